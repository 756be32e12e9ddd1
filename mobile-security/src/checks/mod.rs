mod device_lock;

pub use self::device_lock::{DeviceLockCheck, DEVICE_LOCK_CHECK_NAME};
