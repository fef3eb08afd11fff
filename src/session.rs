//! View session: owns the current configuration and keeps it in step with
//! the persisted fragment.
//!
//! ```text
//!   Idle ──seed──▶ Generating ──completed──▶ Ready
//!    │                 ▲   │                   │
//!    └──fragment──▶ Ready  └──failed──▶ previous state
//! ```
//!
//! Every replacement of the configuration returns the fragment the caller
//! should persist. Feeding that fragment back through `fragment_changed`
//! is a no-op, so a fragment write never loops back into a reload.

use crate::builder;
use crate::codec;
use crate::config::DrawSettings;
use crate::error::{Error, Result};
use crate::geometry::{self, Figure};
use crate::model::Configuration;
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Generating { ticket: u64 },
    Ready,
}

/// Work handed out by `submit_seed`, to be run and passed back to `complete`
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub ticket: u64,
    pub seed: String,
    pub draw: DrawSettings,
}

impl GenerationRequest {
    pub fn run(&self) -> Result<Configuration> {
        builder::build(&self.seed, &self.draw)
    }
}

pub struct Session<R: Rng = StdRng> {
    draw: DrawSettings,
    state: State,
    seed: String,
    configuration: Option<Configuration>,
    /// Fragment most recently handed out for persisting
    written: Option<String>,
    next_ticket: u64,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(draw: DrawSettings, rng: R) -> Self {
        Self {
            draw,
            state: State::Idle,
            seed: String::new(),
            configuration: None,
            written: None,
            next_ticket: 0,
            rng,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.written.as_deref()
    }

    pub fn draw(&self) -> &DrawSettings {
        &self.draw
    }

    /// Geometry of the current configuration; a bare core before one exists
    pub fn render(&self) -> Figure {
        let branches = self
            .configuration
            .as_ref()
            .map(|c| c.branches.as_slice())
            .unwrap_or(&[]);
        geometry::render(branches, &self.draw)
    }

    /// Start deriving a configuration from `seed`. An empty seed leaves the
    /// current configuration alone and yields no work.
    pub fn submit_seed(&mut self, seed: &str) -> Option<GenerationRequest> {
        self.seed = seed.to_string();
        if seed.is_empty() {
            return None;
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.state = State::Generating { ticket };
        tracing::debug!(seed, ticket, "generation requested");
        Some(GenerationRequest {
            ticket,
            seed: seed.to_string(),
            draw: self.draw.clone(),
        })
    }

    /// Apply the outcome of a generation request.
    ///
    /// Only the most recent request is applied; older tickets are dropped.
    /// On failure the previous configuration stays in place.
    pub fn complete(&mut self, ticket: u64, result: Result<Configuration>) -> Result<Option<String>> {
        if self.state != (State::Generating { ticket }) {
            tracing::debug!(ticket, state = ?self.state, "dropping stale generation result");
            return Ok(None);
        }

        match result {
            Ok(configuration) => Ok(Some(self.replace(configuration))),
            Err(e) => {
                self.state = self.settled_state();
                tracing::warn!(ticket, error = %e, "generation failed, keeping previous configuration");
                Err(e)
            }
        }
    }

    /// Submit, run and complete in one step
    pub fn generate(&mut self, seed: &str) -> Result<Option<String>> {
        match self.submit_seed(seed) {
            Some(request) => {
                let result = request.run();
                self.complete(request.ticket, result)
            }
            None => Ok(None),
        }
    }

    /// Change draw settings; regenerates from the last seed if there is one
    pub fn set_draw(&mut self, draw: DrawSettings) -> Option<GenerationRequest> {
        self.draw = draw;
        let seed = self.seed.clone();
        self.submit_seed(&seed)
    }

    /// React to a fragment coming from outside (page load, navigation).
    ///
    /// A fragment equal to the last one this session produced is ignored.
    /// Missing or malformed fragments fall back to a random configuration.
    pub fn fragment_changed(&mut self, fragment: &str) -> Option<String> {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        if self.written.as_deref() == Some(body) {
            tracing::debug!(fragment = body, "ignoring self-written fragment");
            return None;
        }

        let configuration = match codec::decode(body) {
            Ok(configuration) => configuration,
            Err(Error::NoPersistedState) => {
                tracing::debug!("no persisted state, sampling a random snowflake");
                builder::sample(&self.draw, &mut self.rng)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejecting fragment, sampling a random snowflake");
                builder::sample(&self.draw, &mut self.rng)
            }
        };
        Some(self.replace(configuration))
    }

    fn replace(&mut self, configuration: Configuration) -> String {
        let fragment = codec::encode(&configuration);
        tracing::info!(
            branches = configuration.branches.len(),
            fragment = %fragment,
            "configuration replaced"
        );
        self.configuration = Some(configuration);
        self.written = Some(fragment.clone());
        self.state = State::Ready;
        fragment
    }

    fn settled_state(&self) -> State {
        if self.configuration.is_some() {
            State::Ready
        } else {
            State::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Branch;
    use rand::SeedableRng;

    fn session() -> Session {
        let draw = DrawSettings {
            max_branches: 6,
            size: 500,
            ..DrawSettings::default()
        };
        Session::new(draw, StdRng::seed_from_u64(42))
    }

    #[test]
    fn starts_idle() {
        let s = session();
        assert_eq!(s.state(), State::Idle);
        assert!(s.configuration().is_none());
        assert!(s.fragment().is_none());
    }

    #[test]
    fn seed_generation_reaches_ready() {
        let mut s = session();
        let fragment = s.generate("snow").unwrap();
        assert_eq!(fragment.as_deref(), Some("388:70,70:266,51:299,409:85,227:68"));
        assert_eq!(s.state(), State::Ready);
        assert_eq!(s.configuration().unwrap().branches.len(), 5);
    }

    #[test]
    fn empty_seed_keeps_configuration() {
        let mut s = session();
        s.fragment_changed("100:50,200:75");
        let before = s.configuration().cloned();
        assert!(s.submit_seed("").is_none());
        assert_eq!(s.generate("").unwrap(), None);
        assert_eq!(s.configuration().cloned(), before);
        assert_eq!(s.state(), State::Ready);
    }

    #[test]
    fn fragment_loads_configuration() {
        let mut s = session();
        let written = s.fragment_changed("#100:50,200:75");
        assert_eq!(written.as_deref(), Some("100:50,200:75"));
        assert_eq!(
            s.configuration().unwrap().branches,
            vec![Branch::new(100.0, 50.0), Branch::new(200.0, 75.0)]
        );
        assert_eq!(s.render().hexagon_size, Some(100.0));
    }

    #[test]
    fn own_fragment_is_not_reloaded() {
        let mut s = session();
        let fragment = s.generate("snow").unwrap().unwrap();
        let before = s.configuration().cloned();
        assert_eq!(s.fragment_changed(&fragment), None);
        assert_eq!(s.fragment_changed(&format!("#{fragment}")), None);
        // Tapered lengths survive because the write was not read back
        assert_eq!(s.configuration().cloned(), before);
    }

    #[test]
    fn empty_fragment_samples_randomly() {
        for fragment in ["", "#"] {
            let mut s = session();
            let written = s.fragment_changed(fragment).unwrap();
            assert!(!written.is_empty());
            let config = s.configuration().unwrap();
            assert!((1..=6).contains(&config.branches.len()));
            assert_eq!(s.state(), State::Ready);
        }
    }

    #[test]
    fn malformed_fragment_is_rejected_whole() {
        let mut s = session();
        s.fragment_changed("100:50,oops");
        let config = s.configuration().unwrap();
        assert_ne!(config.branches.first(), Some(&Branch::new(100.0, 50.0)));
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut s = session();
        let first = s.submit_seed("first").unwrap();
        let second = s.submit_seed("second").unwrap();

        let late = first.run();
        assert_eq!(s.complete(first.ticket, late).unwrap(), None);
        assert_eq!(s.state(), State::Generating { ticket: second.ticket });

        let result = second.run();
        assert!(s.complete(second.ticket, result).unwrap().is_some());
        assert_eq!(
            s.configuration().cloned().unwrap(),
            builder::build("second", s.draw()).unwrap()
        );
    }

    #[test]
    fn external_fragment_supersedes_pending_generation() {
        let mut s = session();
        let pending = s.submit_seed("snow").unwrap();
        s.fragment_changed("10:10");
        let result = pending.run();
        assert_eq!(s.complete(pending.ticket, result).unwrap(), None);
        assert_eq!(s.fragment(), Some("10:10"));
    }

    #[test]
    fn failure_keeps_previous_configuration() {
        let mut s = session();
        s.fragment_changed("100:50");
        let request = s.submit_seed("snow").unwrap();
        let err = s.complete(request.ticket, Err(Error::EmptySeed));
        assert!(err.is_err());
        assert_eq!(s.state(), State::Ready);
        assert_eq!(s.fragment(), Some("100:50"));
    }

    #[test]
    fn failure_before_any_configuration_returns_to_idle() {
        let mut s = session();
        let request = s.submit_seed("snow").unwrap();
        assert!(s.complete(request.ticket, Err(Error::EmptySeed)).is_err());
        assert_eq!(s.state(), State::Idle);
    }

    #[test]
    fn draw_change_regenerates_last_seed() {
        let mut s = session();
        s.generate("snow").unwrap();
        let bigger = DrawSettings {
            size: 1000,
            ..s.draw().clone()
        };
        let request = s.set_draw(bigger).unwrap();
        assert_eq!(request.seed, "snow");
        assert_eq!(request.draw.size, 1000);
    }

    #[test]
    fn draw_change_without_seed_does_nothing() {
        let mut s = session();
        assert!(s.set_draw(DrawSettings::default()).is_none());
        assert_eq!(s.state(), State::Idle);
    }

    #[test]
    fn render_before_configuration_is_bare_core() {
        let s = session();
        let figure = s.render();
        assert_eq!(figure.hexagon_size, None);
        assert!(figure.arms.iter().all(|arm| arm.polygons.len() == 1));
    }
}
