use thiserror::Error;
use vagas_core::{
    DatePeriod, Field, JobId, Msg, QuickFilter, SortDirection, SortField, SortKey, ViewMode,
};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    ShowOptions(Field),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{value}` is not a valid {what}")]
    InvalidArgument { value: String, what: &'static str },
}

/// Separates values in `select <field> <a|b|...>`.
const VALUE_SEPARATOR: char = '|';

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let msg = match name {
        "" => Msg::NoOp,
        "search" | "s" => Msg::SearchInputChanged(rest.to_string()),
        "quick" | "q" => {
            let name = required(rest, "quick", "a quick filter name")?;
            let quick = QuickFilter::parse(name).ok_or_else(|| invalid(name, "quick filter"))?;
            Msg::QuickFilterSelected(quick)
        }
        "period" => {
            let value = required(rest, "period", "a number of days or `all`")?;
            Msg::DatePeriodSelected(parse_period(value)?)
        }
        "select" => {
            let (field, values) = match rest.split_once(char::is_whitespace) {
                Some((field, values)) => (field, values),
                None => (required(rest, "select", "a field name")?, ""),
            };
            Msg::FieldSelectionChanged {
                field: Field::from_wire(field),
                values: values
                    .split(VALUE_SEPARATOR)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
                    .collect(),
            }
        }
        "selectall" => {
            let field = required(rest, "selectall", "a field name")?;
            Msg::FieldSelectAll(Field::from_wire(field))
        }
        "clear" => Msg::ClearFilters,
        "sort" => Msg::SortSelected(parse_sort(rest)?),
        "more" | "m" => Msg::LoadMoreRequested,
        "open" | "o" => {
            let id = required(rest, "open", "a job id")?;
            let id: JobId = id.parse().map_err(|_| invalid(id, "job id"))?;
            Msg::JobOpened(id)
        }
        "theme" => Msg::ThemeToggled,
        "view" => {
            let mode = required(rest, "view", "`cards` or `compact`")?;
            let mode = ViewMode::parse(mode).ok_or_else(|| invalid(mode, "view mode"))?;
            Msg::ViewModeSelected(mode)
        }
        "reload" => Msg::LoadRequested,
        "options" => {
            let field = required(rest, "options", "a field name")?;
            return Ok(Command::ShowOptions(Field::from_wire(field)));
        }
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Dispatch(msg))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn invalid(value: &str, what: &'static str) -> CommandError {
    CommandError::InvalidArgument {
        value: value.to_string(),
        what,
    }
}

fn parse_period(value: &str) -> Result<Option<DatePeriod>, CommandError> {
    if value == "all" {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(DatePeriod::from_days)
        .map(Some)
        .ok_or_else(|| invalid(value, "period (1, 7, 30, 90 or all)"))
}

fn parse_sort(rest: &str) -> Result<SortKey, CommandError> {
    let mut words = rest.split_whitespace();
    let field = match words.next() {
        Some("date") => SortField::Date,
        Some("company") => SortField::Company,
        Some("title") => SortField::Title,
        Some(other) => return Err(invalid(other, "sort field")),
        None => {
            return Err(CommandError::MissingArgument {
                command: "sort",
                what: "`date`, `company` or `title`",
            })
        }
    };
    let direction = match words.next() {
        None | Some("desc") => SortDirection::Desc,
        Some("asc") => SortDirection::Asc,
        Some(other) => return Err(invalid(other, "sort direction")),
    };
    Ok(SortKey::new(field, direction))
}
