//! Integration tests for the scene model and boundary contracts
