//! Request dispatch
//!
//! One transition per request: parse the action, sanitize the path, apply
//! the action's guard, run its executor, and fold any untyped failure into
//! the generic forbidden shape. The pipeline holds no state across
//! requests.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::error::GatewayError;
use crate::gateway::action::Action;
use crate::gateway::executor;
use crate::gateway::guard;
use crate::gateway::results::OperationOutcome;
use crate::gateway::sanitize;
use crate::gateway::upload::UploadedPayload;

/// One gateway request as the core sees it.
#[derive(Debug)]
pub struct GatewayRequest {
    /// Still-percent-encoded URI path.
    pub raw_path: String,
    /// Raw `action` parameter, if the client sent one.
    pub action: Option<String>,
    /// Spooled `file` parameter for save/append.
    pub upload: Option<UploadedPayload>,
}

/// The request pipeline, bound to a root directory.
#[derive(Debug)]
pub struct Dispatcher {
    root: PathBuf,
}

impl Dispatcher {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one request through sanitize, guard, and execute.
    ///
    /// Typed `NotFound`/`Forbidden` failures pass through untouched; any
    /// remaining I/O error becomes `Forbidden("Cannot <action> <path> due
    /// to <message>")`, so clients only ever see two failure shapes.
    pub fn dispatch(&self, request: GatewayRequest) -> Result<OperationOutcome, GatewayError> {
        let action = Action::parse(request.action.as_deref());
        info!("dispatching {} {}", action.verb(), request.raw_path);

        match self.run(&action, &request.raw_path, request.upload) {
            Err(GatewayError::Io(e)) => {
                warn!("{} {} failed: {}", action.verb(), request.raw_path, e);
                Err(GatewayError::Forbidden(format!(
                    "Cannot {} {} due to {}",
                    action.verb(),
                    request.raw_path,
                    e
                )))
            }
            other => other,
        }
    }

    fn run(
        &self,
        action: &Action,
        raw_path: &str,
        upload: Option<UploadedPayload>,
    ) -> Result<OperationOutcome, GatewayError> {
        if let Action::Unknown(value) = action {
            // No filesystem contact for unrecognized actions.
            return Err(GatewayError::Forbidden(format!("Unknown action {}", value)));
        }

        let path = sanitize::sanitize(&self.root, raw_path)?;

        match action {
            Action::Send => guard::with_readable(&path, |real| {
                executor::send_file(real).map(OperationOutcome::Sent)
            }),
            Action::Save => guard::with_modifiable(&path, |real| {
                executor::save_file(real, require_upload(upload)?)?;
                Ok(OperationOutcome::Done(format!("Saved {}", real.display())))
            }),
            Action::Append => guard::with_modifiable(&path, |real| {
                executor::append_file(real, &require_upload(upload)?)?;
                Ok(OperationOutcome::Done(format!(
                    "Appended to {}",
                    real.display()
                )))
            }),
            Action::Touch => guard::with_modifiable(&path, |real| {
                executor::touch_file(real)?;
                Ok(OperationOutcome::Done(format!("Touched {}", raw_path)))
            }),
            Action::MakeDir => guard::with_modifiable(&path, |real| {
                executor::make_directory(real)?;
                Ok(OperationOutcome::Done(format!(
                    "Created directory {}",
                    raw_path
                )))
            }),
            Action::Remove => executor::remove_path(&path).map(OperationOutcome::Done),
            Action::Unknown(_) => unreachable!("handled before sanitization"),
        }
    }
}

fn require_upload(upload: Option<UploadedPayload>) -> Result<UploadedPayload, GatewayError> {
    upload.ok_or_else(|| GatewayError::Forbidden("Did not receive a file".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn request(raw_path: &str, action: Option<&str>) -> GatewayRequest {
        GatewayRequest {
            raw_path: raw_path.to_string(),
            action: action.map(str::to_string),
            upload: None,
        }
    }

    fn upload(bytes: &[u8]) -> Option<UploadedPayload> {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(bytes).unwrap();
        temp.flush().unwrap();
        Some(UploadedPayload::new("upload.bin".to_string(), temp))
    }

    #[test]
    fn unknown_action_is_forbidden_without_touching_the_filesystem() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().join("root"));

        let result = dispatcher.dispatch(request("/fancy/file.txt", Some("craziness")));
        match result {
            Err(GatewayError::Forbidden(msg)) => assert_eq!(msg, "Unknown action craziness"),
            other => panic!("expected Forbidden, got {:?}", other),
        }
        // The root was never created, let alone the requested parents.
        assert!(!dir.path().join("root").exists());
    }

    #[test]
    fn empty_action_is_forbidden() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        assert!(matches!(
            dispatcher.dispatch(request("/fancy/file.txt", Some(""))),
            Err(GatewayError::Forbidden(_))
        ));
    }

    #[test]
    fn send_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        match dispatcher.dispatch(request("/missing.txt", None)) {
            Err(GatewayError::NotFound(requested)) => assert_eq!(requested, "/missing.txt"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn send_returns_contents_descriptor() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), b"hello").unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        match dispatcher.dispatch(request("/readme.txt", None)).unwrap() {
            OperationOutcome::Sent(sent) => assert_eq!(sent.body.len(), 5),
            other => panic!("expected Sent, got {:?}", other),
        }
    }

    #[test]
    fn traversal_is_rejected_before_any_guard() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        assert!(matches!(
            dispatcher.dispatch(request("/../outside.txt", Some("touch"))),
            Err(GatewayError::Forbidden(_))
        ));
    }

    #[test]
    fn save_creates_parents_and_moves_the_payload() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        let outcome = dispatcher
            .dispatch(GatewayRequest {
                raw_path: "/new/dir/file.txt".to_string(),
                action: Some("save".to_string()),
                upload: upload(b"uploaded"),
            })
            .unwrap();

        match outcome {
            OperationOutcome::Done(msg) => assert!(msg.starts_with("Saved "), "{}", msg),
            other => panic!("expected Done, got {:?}", other),
        }
        assert_eq!(
            fs::read(dir.path().join("new/dir/file.txt")).unwrap(),
            b"uploaded"
        );
    }

    #[test]
    fn save_without_payload_is_forbidden() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        match dispatcher.dispatch(request("/file.txt", Some("save"))) {
            Err(GatewayError::Forbidden(msg)) => assert_eq!(msg, "Did not receive a file"),
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn append_without_payload_is_forbidden() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        match dispatcher.dispatch(request("/file.txt", Some("append"))) {
            Err(GatewayError::Forbidden(msg)) => assert_eq!(msg, "Did not receive a file"),
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn append_extends_an_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"start;").unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        dispatcher
            .dispatch(GatewayRequest {
                raw_path: "/notes.txt".to_string(),
                action: Some("append".to_string()),
                upload: upload(b"more"),
            })
            .unwrap();

        assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), b"start;more");
    }

    #[test]
    fn makedir_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        let outcome = dispatcher
            .dispatch(request("/a/b/tree", Some("makedir")))
            .unwrap();

        match outcome {
            OperationOutcome::Done(msg) => assert_eq!(msg, "Created directory /a/b/tree"),
            other => panic!("expected Done, got {:?}", other),
        }
        assert!(dir.path().join("a/b/tree").is_dir());
    }

    #[test]
    fn touch_echoes_the_requested_path() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        let outcome = dispatcher
            .dispatch(request("/stamp.txt", Some("touch")))
            .unwrap();

        match outcome {
            OperationOutcome::Done(msg) => assert_eq!(msg, "Touched /stamp.txt"),
            other => panic!("expected Done, got {:?}", other),
        }
        assert!(dir.path().join("stamp.txt").is_file());
    }

    #[test]
    fn remove_nonempty_directory_folds_into_forbidden() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tree")).unwrap();
        fs::write(dir.path().join("tree/leaf.txt"), b"x").unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        match dispatcher.dispatch(request("/tree", Some("remove"))) {
            Err(GatewayError::Forbidden(msg)) => {
                assert!(msg.starts_with("Cannot remove /tree due to "), "{}", msg);
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
        assert!(dir.path().join("tree").is_dir());
    }

    #[test]
    fn remove_deletes_file_and_empty_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("gone.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("hollow")).unwrap();
        let dispatcher = Dispatcher::new(dir.path().to_path_buf());

        dispatcher.dispatch(request("/gone.txt", Some("remove"))).unwrap();
        dispatcher.dispatch(request("/hollow", Some("remove"))).unwrap();

        assert!(!dir.path().join("gone.txt").exists());
        assert!(!dir.path().join("hollow").exists());
    }
}
