//! Behaviour suites for the lens daemon.
