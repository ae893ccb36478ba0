pub(crate) mod constant_sequence;
pub(crate) mod geometric_sequence;
pub(crate) mod luby_sequence;
pub(crate) mod sequence_generator;
pub(crate) mod sequence_generator_type;

pub(crate) use constant_sequence::ConstantSequence;
pub(crate) use geometric_sequence::GeometricSequence;
pub(crate) use luby_sequence::LubySequence;
pub(crate) use sequence_generator::SequenceGenerator;
pub use sequence_generator_type::SequenceGeneratorType;
