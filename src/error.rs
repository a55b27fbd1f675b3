use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("jit module error: {0}")]
    Module(#[from] cranelift_module::ModuleError),

    #[error("failed to allocate executable memory: {0}")]
    Alloc(#[from] std::io::Error),

    #[error("failed to finalize assembled code")]
    Finalize,

    #[error("unknown builtin `{0}`")]
    UnknownBuiltin(String),

    #[error("bad call `{text}`: {message}")]
    BadCall { text: String, message: String },

    #[error("backend `{0}` is not available on this target")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn bad_call(text: &str, message: impl Into<String>) -> Self {
        Error::BadCall {
            text: text.to_owned(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
