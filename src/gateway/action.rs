//! Action selection
//!
//! Maps the request's `action` parameter onto the closed set of filesystem
//! operations the gateway performs.

/// The filesystem operation a request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Default when no action parameter is supplied: send the file back.
    Send,
    /// Create or overwrite the target from an uploaded payload.
    Save,
    /// Append an uploaded payload's bytes to the target.
    Append,
    /// Create an empty file or refresh the target's modification time.
    Touch,
    /// Create the target directory and any missing parents.
    MakeDir,
    /// Delete a file or an empty directory.
    Remove,
    /// Anything unrecognized, kept verbatim for the error message. An empty
    /// string lands here too.
    Unknown(String),
}

impl Action {
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            None => Action::Send,
            Some("save") => Action::Save,
            Some("append") => Action::Append,
            Some("touch") => Action::Touch,
            Some("makedir") => Action::MakeDir,
            Some("remove") => Action::Remove,
            Some(other) => Action::Unknown(other.to_string()),
        }
    }

    /// Verb used in the dispatcher's catch-all message
    /// ("Cannot \<verb\> \<path\> due to ...").
    pub fn verb(&self) -> &str {
        match self {
            Action::Send => "send",
            Action::Save => "save",
            Action::Append => "append",
            Action::Touch => "touch",
            Action::MakeDir => "makedir",
            Action::Remove => "remove",
            Action::Unknown(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parameter_defaults_to_send() {
        assert_eq!(Action::parse(None), Action::Send);
    }

    #[test]
    fn recognized_values_map_to_their_operation() {
        assert_eq!(Action::parse(Some("save")), Action::Save);
        assert_eq!(Action::parse(Some("append")), Action::Append);
        assert_eq!(Action::parse(Some("touch")), Action::Touch);
        assert_eq!(Action::parse(Some("makedir")), Action::MakeDir);
        assert_eq!(Action::parse(Some("remove")), Action::Remove);
    }

    #[test]
    fn unrecognized_values_are_kept_verbatim() {
        assert_eq!(
            Action::parse(Some("craziness")),
            Action::Unknown("craziness".to_string())
        );
    }

    #[test]
    fn empty_string_is_unknown() {
        assert_eq!(Action::parse(Some("")), Action::Unknown(String::new()));
    }
}
