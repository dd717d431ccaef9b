//! Per-call request metadata.

use crate::ids::{DeviceId, RequestId};

/// Metadata carried through one selection call. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlates log lines for one incoming request.
    pub request_id: RequestId,
    /// Display that issued the request; scopes the result cache.
    pub device_id: DeviceId,
    /// Background look-ahead selection.
    pub prefetch: bool,
}

impl RequestContext {
    pub fn new(request_id: impl Into<RequestId>, device_id: impl Into<DeviceId>) -> Self {
        Self {
            request_id: request_id.into(),
            device_id: device_id.into(),
            prefetch: false,
        }
    }

    /// Context for a device whose request carried no id.
    pub fn for_device(device_id: impl Into<DeviceId>) -> Self {
        Self {
            request_id: RequestId::generate(),
            device_id: device_id.into(),
            prefetch: false,
        }
    }

    pub fn as_prefetch(mut self) -> Self {
        self.prefetch = true;
        self
    }
}
