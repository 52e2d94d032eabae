use chrono::prelude::*;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced local-storage key for one persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

/// Load-or-default and best-effort save for anything with a [`StorageKey`].
/// Storage failures are logged and swallowed; persistence is a convenience,
/// never a requirement.
pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Serialize + DeserializeOwned + Default,
{
    fn local_or_default() -> Self {
        LocalStorage::get(Self::KEY).unwrap_or_default()
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("could not save {:?} to local storage: {:?}", Self::KEY, err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// "32s", "4m", "1h 12m".
pub(crate) fn format_elapsed(secs: i64) -> String {
    match secs.max(0) {
        s @ 0..60 => format!("{}s", s),
        s @ 60..3600 => format!("{}m", s / 60),
        s => format!("{}h {}m", s / 3600, (s % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_by_magnitude() {
        assert_eq!(format_elapsed(-5), "0s");
        assert_eq!(format_elapsed(32), "32s");
        assert_eq!(format_elapsed(59), "59s");
        assert_eq!(format_elapsed(60), "1m");
        assert_eq!(format_elapsed(3599), "59m");
        assert_eq!(format_elapsed(4320), "1h 12m");
    }
}
