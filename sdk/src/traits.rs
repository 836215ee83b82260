use crate::error::FlagError;
use crate::flagset::FlagSet;
use crate::names::NameBuilder;

/// Registers a flag for every enabled field of a message.
///
/// Implemented by generated code. The set keeps mutable borrows of the fields
/// until it is dropped; parsed values land directly in the message.
pub trait Bind {
    fn bind<'a>(&'a mut self, fs: &mut FlagSet<'a>, names: &NameBuilder) -> Result<(), FlagError>;
}

/// Assigns the declared default of every field that has one, and recurses into
/// nested messages.
pub trait SetDefaults {
    fn set_defaults(&mut self);
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn bind<'a>(&'a mut self, fs: &mut FlagSet<'a>, names: &NameBuilder) -> Result<(), FlagError> {
        (**self).bind(fs, names)
    }
}

impl<T: SetDefaults + ?Sized> SetDefaults for Box<T> {
    fn set_defaults(&mut self) {
        (**self).set_defaults()
    }
}
