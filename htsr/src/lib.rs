#[cfg(feature = "core")]
#[doc(inline)]
pub use htsr_core as core;

#[cfg(feature = "stats")]
#[doc(inline)]
pub use htsr_stats as stats;

#[cfg(feature = "io")]
#[doc(inline)]
pub use htsr_io as io;
