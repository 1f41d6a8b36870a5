/// Per-call progress of a seek.
///
/// Created by the seeker for every `find` and threaded through the visitor.
/// Each accepted candidate decrements the remaining count; the one bringing it
/// to zero is recorded and the context finishes. Later candidates are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekContext<G> {
    start_granule: G,
    remaining_count: u64,
    found_granule: Option<G>,
    finished: bool,
}

impl<G: Clone> SeekContext<G> {
    /// A context looking for the `count`-th accepted candidate.
    ///
    /// A zero count is finished immediately with the start as result.
    pub fn new(start_granule: G, count: u64) -> Self {
        let found_granule = (count == 0).then(|| start_granule.clone());
        Self {
            start_granule,
            remaining_count: count,
            finished: count == 0,
            found_granule,
        }
    }

    pub fn start_granule(&self) -> &G {
        &self.start_granule
    }

    pub fn remaining_count(&self) -> u64 {
        self.remaining_count
    }

    pub fn found_granule(&self) -> Option<&G> {
        self.found_granule.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn process_candidate(&mut self, candidate: G) {
        if self.finished {
            return;
        }
        self.remaining_count = self.remaining_count.saturating_sub(1);
        if self.remaining_count == 0 {
            self.found_granule = Some(candidate);
            self.finished = true;
        }
    }

    pub fn into_found(self) -> Option<G> {
        self.found_granule
    }
}
