/// What went wrong.
#[derive(Debug)]
pub enum Kind {
    /// reading or writing files failed
    OsError,
    /// the argument is incomplete
    InputError,
    /// a formula is not well-formed
    SyntaxError,
}

#[derive(Debug)]
pub struct Error(Kind, Option<Box<dyn std::error::Error>>);

impl Error {
    pub fn new(k: Kind, e: Box<dyn std::error::Error>) -> Self {
        Self(k, Some(e))
    }

    pub fn get_kind(&self) -> &Kind {
        &self.0
    }

    pub fn get_error(&self) -> &Option<Box<dyn std::error::Error>> {
        &self.1
    }
}

impl From<Kind> for Error {
    fn from(k: Kind) -> Self {
        Self(k, None)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(Kind::OsError, e.into())
    }
}

impl From<tableau::Error> for Error {
    fn from(e: tableau::Error) -> Self {
        Self::new(Kind::SyntaxError, e.to_string().into())
    }
}
