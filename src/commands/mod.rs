pub mod fix_cmd;

pub use fix_cmd::run_fix;
