use easy_ext::ext;

pub(crate) mod prelude {
    pub(crate) use super::ErrorExt as _;
}

#[ext(ErrorExt)]
pub impl<E> E
where
    E: std::error::Error + ?Sized,
{
    /// Formats the error along with all of its sources, e.g. for the terminal.
    fn display_chain(&self) -> display_error_chain::DisplayErrorChain<&Self> {
        display_error_chain::DisplayErrorChain::new(self)
    }
}
