use std::io::Write;

use chrono::{DateTime, Local};
use vagas_core::{AppViewModel, Effect, Msg, VisitedFlags, VisitedStore};
use vagas_engine::{DataSource, EngineError, EngineEvent, EngineHandle, FetchSettings};
use vagas_logging::{vagas_info, vagas_warn};

use super::persistence::RonStore;
use super::ui;

/// Carries out the effects the core asks for and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    source: DataSource,
    visited: VisitedFlags<RonStore>,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        source: DataSource,
        store: RonStore,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
            source,
            visited: VisitedFlags::new(store),
        })
    }

    pub fn visited(&self) -> &VisitedFlags<RonStore> {
        &self.visited
    }

    /// Runs `effects` in order and returns the messages they produce.
    pub fn run(
        &mut self,
        effects: Vec<Effect>,
        view: &AppViewModel,
        out: &mut dyn Write,
    ) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchJobs => {
                    if !self.engine.load(self.source.clone()) {
                        vagas_warn!("Load requested while another load is running");
                    }
                }
                Effect::RenderPage { job_ids, append } => {
                    let text = ui::render::render_page(view, &job_ids, append, &self.visited);
                    write_block(out, &text);
                    follow_ups.push(Msg::PageRendered);
                }
                Effect::OpenJob { job_id, url } => {
                    vagas_info!("Opening job {} at {}", job_id, url);
                    write_block(out, &ui::render::render_opened(job_id, &url));
                }
                Effect::MarkVisited(job_id) => self.visited.mark_visited(job_id),
                Effect::RedrawCard(job_id) => {
                    write_block(out, &ui::render::render_redraw(view, job_id, &self.visited));
                }
                Effect::PersistPreferences(preferences) => {
                    preferences.save(self.visited.store_mut());
                }
            }
        }
        follow_ups
    }

    /// Next finished load, converted to the message the core expects.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(|event| match event {
            EngineEvent::LoadCompleted(Ok(loaded)) => Msg::JobsLoaded {
                jobs: loaded.jobs,
                skipped: loaded.skipped,
                last_modified: loaded
                    .metadata
                    .last_modified
                    .as_deref()
                    .map(format_last_modified),
                today: Local::now().date_naive(),
            },
            EngineEvent::LoadCompleted(Err(err)) => {
                vagas_warn!("Loading jobs failed: {}", err);
                Msg::LoadFailed(err.to_string())
            }
        })
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

pub fn write_block(out: &mut dyn Write, text: &str) {
    if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        vagas_warn!("Failed to write to the terminal: {}", err);
    }
}

/// `Last-Modified` header shown as local `dd/mm/yyyy - HH:MM`; unparseable values pass through.
fn format_last_modified(raw: &str) -> String {
    match DateTime::parse_from_rfc2822(raw) {
        Ok(time) => time.with_timezone(&Local).format("%d/%m/%Y - %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
