mod timer;

pub(crate) use timer::Timer;
