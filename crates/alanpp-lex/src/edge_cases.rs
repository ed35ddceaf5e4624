//! Edge-case tests for the Alan++ lexer, exercising whole-source scenarios
//! rather than one production at a time.
