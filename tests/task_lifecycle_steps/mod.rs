//! Step definitions for task lifecycle BDD scenarios.
