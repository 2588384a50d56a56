use core::time::Duration;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC. The default.
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH: Duration = Duration::from_millis(1_293_840_000_000);

/// The Unix epoch itself: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_ORIGIN: Duration = Duration::from_millis(0);

/// A source of millisecond timestamps relative to some epoch.
///
/// [`Generator`] only ever reads the clock through this trait, which lets
/// tests drive it with a scripted clock.
///
/// # Example
///
/// ```
/// use snowid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
///
/// [`Generator`]: crate::Generator
pub trait TimeSource {
    /// Returns the current time in whole milliseconds since the epoch.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}
