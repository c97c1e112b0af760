mod shell;
pub use shell::Shell;

mod sign_in;
pub use sign_in::SignInView;

mod workflow;
pub use workflow::WorkflowView;
