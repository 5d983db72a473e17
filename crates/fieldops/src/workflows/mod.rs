pub mod coaching;
