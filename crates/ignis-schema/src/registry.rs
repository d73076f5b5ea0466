//! Registry for artifact emitters.

use crate::traits::Emitter;
use std::sync::{OnceLock, RwLock};

static EMITTERS: RwLock<Vec<&'static dyn Emitter>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom emitter.
///
/// Built-in emitters are registered automatically on first use.
pub fn register_emitter(emitter: &'static dyn Emitter) {
    init_builtin();
    EMITTERS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(emitter);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        #[allow(unused_mut)]
        let mut emitters = EMITTERS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        #[cfg(feature = "backend-typescript")]
        {
            emitters.push(&crate::output::typescript::TYPESCRIPT_EMITTER);
        }

        #[cfg(feature = "backend-markdown")]
        {
            emitters.push(&crate::output::markdown::MARKDOWN_EMITTER);
        }
    });
}

/// Get an emitter by name.
pub fn get_emitter(name: &str) -> Option<&'static dyn Emitter> {
    emitters().into_iter().find(|e| e.name() == name)
}

/// List all registered emitters.
pub fn emitters() -> Vec<&'static dyn Emitter> {
    init_builtin();
    EMITTERS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// List all registered emitter names.
pub fn emitter_names() -> Vec<&'static str> {
    emitters().iter().map(|e| e.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(all(feature = "backend-typescript", feature = "backend-markdown"))]
    fn builtin_emitters_are_registered() {
        let names = emitter_names();
        assert!(names.contains(&"typescript"));
        assert!(names.contains(&"markdown"));
        assert_eq!(get_emitter("typescript").map(|e| e.extension()), Some("ts"));
        assert!(get_emitter("cobol").is_none());
    }
}
