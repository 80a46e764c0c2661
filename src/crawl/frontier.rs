// src/crawl/frontier.rs
// =============================================================================
// The Frontier (links waiting to be fetched) and the Visited Set (links that
// have been dispatched or finished).
//
// How it works:
// - enqueue_if_new() is the only way in. It refuses any link whose absolute
//   target is already known, in either collection.
// - dequeue_batch() pops from the front (FIFO, so roughly breadth-first) and
//   moves each link into Visited at the same moment. Visited keeps dispatch
//   order, which is also the order of the final report.
// - record() stores the classified link in the slot it was given at
//   dispatch time. A slot is written once; later writes are ignored.
//
// One HashSet of absolute targets covers both collections: a link is in it
// from the moment it is queued until the end of the crawl.
//
// The crawl loop is the only owner, so there is no locking here.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use crate::link::Link;

/// Position of a dispatched link in the Visited Set
pub type VisitedSlot = usize;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Link>,
    visited: Vec<Link>,
    known: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the link unless its absolute target is already queued or visited
    ///
    /// Returns false (and changes nothing) for a duplicate.
    pub fn enqueue_if_new(&mut self, link: Link) -> bool {
        if !self.known.insert(link.absolute_target()) {
            return false;
        }
        self.queue.push_back(link);
        true
    }

    /// Removes up to `max_count` links from the front, moving each into Visited
    pub fn dequeue_batch(&mut self, max_count: usize) -> Vec<(VisitedSlot, Link)> {
        let count = max_count.min(self.queue.len());
        let mut batch = Vec::with_capacity(count);

        for link in self.queue.drain(..count) {
            let slot = self.visited.len();
            self.visited.push(link.clone());
            batch.push((slot, link));
        }

        batch
    }

    /// Stores the classification of a dispatched link
    ///
    /// Returns false if the slot doesn't exist or was already classified.
    pub fn record(&mut self, slot: VisitedSlot, mut link: Link) -> bool {
        match self.visited.get_mut(slot) {
            Some(entry) if !entry.is_checked() && link.is_checked() => {
                link.body = None;
                *entry = link;
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of links waiting in the Frontier
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Number of links dispatched so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> &[Link] {
        &self.visited
    }

    /// Consumes the Frontier, returning the Visited Set in dispatch order
    pub fn into_visited(self) -> Vec<Link> {
        self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkStatus;

    fn link(href: &str) -> Link {
        Link::discovered(href, href, "https://example.com/")
    }

    #[test]
    fn test_enqueue_twice_keeps_one_entry() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue_if_new(link("/a")));
        assert!(!frontier.enqueue_if_new(link("/a")));
        assert_eq!(frontier.pending_count(), 1);
    }

    #[test]
    fn test_equal_absolute_targets_are_duplicates() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue_if_new(link("/a")));
        assert!(!frontier.enqueue_if_new(link("https://example.com/a")));
        assert!(!frontier.enqueue_if_new(Link::discovered("a", "A", "https://example.com/index")));
        assert_eq!(frontier.pending_count(), 1);
    }

    #[test]
    fn test_visited_links_are_duplicates() {
        let mut frontier = Frontier::new();
        frontier.enqueue_if_new(link("/a"));
        let batch = frontier.dequeue_batch(5);
        assert_eq!(batch.len(), 1);
        assert!(frontier.is_empty());

        assert!(!frontier.enqueue_if_new(link("/a")));
        assert!(frontier.is_empty());
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_dequeue_is_fifo_and_bounded() {
        let mut frontier = Frontier::new();
        for href in ["/1", "/2", "/3"] {
            frontier.enqueue_if_new(link(href));
        }

        let batch = frontier.dequeue_batch(2);
        let hrefs: Vec<_> = batch.iter().map(|(_, l)| l.relative_target.as_str()).collect();
        assert_eq!(hrefs, vec!["/1", "/2"]);
        assert_eq!(batch[0].0, 0);
        assert_eq!(batch[1].0, 1);
        assert_eq!(frontier.pending_count(), 1);

        assert!(frontier.dequeue_batch(0).is_empty());
        assert_eq!(frontier.dequeue_batch(10).len(), 1);
        assert!(frontier.dequeue_batch(10).is_empty());
    }

    #[test]
    fn test_record_writes_once_and_drops_body() {
        let mut frontier = Frontier::new();
        frontier.enqueue_if_new(link("/a"));
        let (slot, dispatched) = frontier.dequeue_batch(1).remove(0);

        let alive = dispatched.clone().mark_alive(Some("<html></html>".to_string()));
        assert!(frontier.record(slot, alive));
        assert!(!frontier.record(slot, dispatched.mark_dead()));

        let visited = frontier.into_visited();
        assert_eq!(visited[0].status, LinkStatus::Alive);
        assert!(visited[0].body.is_none());
    }

    #[test]
    fn test_record_rejects_unknown_slot_and_unchecked_link() {
        let mut frontier = Frontier::new();
        frontier.enqueue_if_new(link("/a"));
        let (slot, dispatched) = frontier.dequeue_batch(1).remove(0);

        assert!(!frontier.record(slot, dispatched.clone()));
        assert!(!frontier.record(slot + 1, dispatched.mark_dead()));
        assert_eq!(frontier.visited()[0].status, LinkStatus::Unchecked);
    }
}
