//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
pub struct CassetteReplayer {
    /// Per `(port, method)` queue of interactions still to be served.
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    /// Last interaction handed out, kept so callers can borrow it.
    current: Option<Interaction>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, current: None }
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, naming what was requested and which
    /// port/method pairs still have interactions queued.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        let next = self.queues.get_mut(&key).and_then(VecDeque::pop_front);

        let Some(interaction) = next else {
            let mut available: Vec<String> = self
                .queues
                .iter()
                .filter(|(_, q)| !q.is_empty())
                .map(|((p, m), q)| format!("{p}::{m} ({})", q.len()))
                .collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions left for port={port:?} method={method:?}. \
                 Remaining: [{}]",
                available.join(", ")
            );
        };

        self.current.insert(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            source: "/repo".into(),
            interactions,
        }
    }

    #[test]
    fn serves_each_port_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "http", "get", json!({"ok": {"status": 200, "body": "a"}})),
            interaction(1, "http", "download", json!({"ok": {"status": 200}})),
            interaction(2, "http", "get", json!({"ok": {"status": 404, "body": ""}})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        // download is independent of the get queue
        assert_eq!(replayer.next_interaction("http", "download").seq, 1);
        assert_eq!(replayer.next_interaction("http", "get").seq, 0);
        assert_eq!(replayer.next_interaction("http", "get").seq, 2);
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![interaction(0, "llm", "complete", json!({}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("llm", "complete");
        let _ = replayer.next_interaction("llm", "complete");
    }

    #[test]
    #[should_panic(expected = "Remaining: [fs::exists (1)]")]
    fn unknown_port_lists_what_is_left() {
        let cassette = make_cassette(vec![interaction(0, "fs", "exists", json!(true))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("http", "get");
    }
}
