mod binary_greater_or_equal;
mod linear_less_or_equal;
mod linear_not_equal;

pub(crate) use binary_greater_or_equal::BinaryGreaterOrEqualPropagator;
pub(crate) use linear_less_or_equal::LinearLessOrEqualPropagator;
pub(crate) use linear_not_equal::LinearNotEqualPropagator;
