//! Cross-module tests: published vectors and end-to-end scenarios.

mod vectors;
