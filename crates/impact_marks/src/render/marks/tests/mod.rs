//! Session-level tests driving the mark system the way a game frame loop does

mod scenario;
