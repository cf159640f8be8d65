use crate::{JobId, Preferences};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchJobs,
    /// Draw these cards. `append == false` replaces whatever was shown.
    /// The platform answers with `Msg::PageRendered`.
    RenderPage { job_ids: Vec<JobId>, append: bool },
    OpenJob { job_id: JobId, url: String },
    MarkVisited(JobId),
    /// Draw an already shown card again, e.g. after it became visited.
    RedrawCard(JobId),
    PersistPreferences(Preferences),
}
