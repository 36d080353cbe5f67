mod init;
mod inspect;
mod process;

pub use init::run_init;
pub use inspect::run_inspect;
pub use process::run_process;
