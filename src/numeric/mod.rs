mod impl_float_maths;
mod impl_numeric;

pub use self::impl_float_maths::IsClose;
