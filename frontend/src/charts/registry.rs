use std::collections::HashMap;

use super::config::ChartConfig;
use crate::error::ChartError;

/// Something that can put a chart into a container and take it down again.
pub trait ChartSurface {
    type Handle;

    fn create(&self, container_id: &str, config: &ChartConfig) -> Result<Self::Handle, ChartError>;
    fn destroy(&self, handle: Self::Handle);
}

/// Owns at most one live chart per container.
pub struct ChartRegistry<S: ChartSurface> {
    surface: S,
    live: HashMap<String, S::Handle>,
}

impl<S: ChartSurface> ChartRegistry<S> {
    pub fn new(surface: S) -> Self {
        ChartRegistry {
            surface,
            live: HashMap::new(),
        }
    }

    /// Destroys whatever chart the container holds, then draws `config` in it.
    pub fn upsert(&mut self, container_id: &str, config: &ChartConfig) -> Result<(), ChartError> {
        self.remove(container_id);
        let handle = self.surface.create(container_id, config)?;
        self.live.insert(container_id.to_string(), handle);
        Ok(())
    }

    pub fn remove(&mut self, container_id: &str) {
        if let Some(old) = self.live.remove(container_id) {
            self.surface.destroy(old);
        }
    }

    /// `upsert` for `Some`, `remove` for `None`.
    pub fn sync(&mut self, container_id: &str, config: Option<&ChartConfig>) -> Result<(), ChartError> {
        match config {
            Some(config) => self.upsert(container_id, config),
            None => {
                self.remove(container_id);
                Ok(())
            }
        }
    }

    pub fn is_live(&self, container_id: &str) -> bool {
        self.live.contains_key(container_id)
    }

    pub fn clear(&mut self) {
        for (_, handle) in self.live.drain() {
            self.surface.destroy(handle);
        }
    }
}

impl<S: ChartSurface> Drop for ChartRegistry<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::config::{ChartKind, Dataset};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        next: RefCell<u32>,
        events: RefCell<Vec<String>>,
        missing: Vec<&'static str>,
    }

    impl ChartSurface for &Recorder {
        type Handle = u32;

        fn create(&self, container_id: &str, _config: &ChartConfig) -> Result<u32, ChartError> {
            if self.missing.iter().any(|m| *m == container_id) {
                return Err(ChartError::MissingContainer(container_id.to_string()));
            }
            let mut next = self.next.borrow_mut();
            *next += 1;
            self.events
                .borrow_mut()
                .push(format!("create {} #{}", container_id, *next));
            Ok(*next)
        }

        fn destroy(&self, handle: u32) {
            self.events.borrow_mut().push(format!("destroy #{}", handle));
        }
    }

    fn config() -> ChartConfig {
        ChartConfig::new(
            ChartKind::Pie,
            vec!["a".to_string()],
            vec![Dataset::new(vec![1.0])],
            serde_json::json!({}),
        )
    }

    #[test]
    fn upsert_destroys_previous_instance_once() {
        let recorder = Recorder::default();
        let mut registry = ChartRegistry::new(&recorder);
        registry.upsert("expenseChart", &config()).unwrap();
        registry.upsert("expenseChart", &config()).unwrap();
        registry.upsert("trendChart", &config()).unwrap();
        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "create expenseChart #1",
                "destroy #1",
                "create expenseChart #2",
                "create trendChart #3",
            ]
        );
    }

    #[test]
    fn sync_none_clears_container() {
        let recorder = Recorder::default();
        let mut registry = ChartRegistry::new(&recorder);
        registry.sync("goalsChart", Some(&config())).unwrap();
        assert!(registry.is_live("goalsChart"));
        registry.sync("goalsChart", None).unwrap();
        assert!(!registry.is_live("goalsChart"));
        assert_eq!(recorder.events.borrow().last().unwrap(), "destroy #1");
    }

    #[test]
    fn failed_create_leaves_container_empty() {
        let recorder = Recorder {
            missing: vec!["gone"],
            ..Recorder::default()
        };
        let mut registry = ChartRegistry::new(&recorder);
        let err = registry.upsert("gone", &config()).unwrap_err();
        assert_eq!(err, ChartError::MissingContainer("gone".to_string()));
        assert!(!registry.is_live("gone"));
    }
}
