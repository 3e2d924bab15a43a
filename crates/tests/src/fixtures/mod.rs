
pub use seed::*;
pub use test_call::{init_tracing, wait_until, TestCall, TestClock};
pub use transport::{EditRequest, FetchRequest, ScriptedEdit, ScriptedFetch, ScriptedTransport};
