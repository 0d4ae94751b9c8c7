use std::sync::atomic::{AtomicU64, Ordering};

use getset::CopyGetters;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastCGIConnectionID(pub u64);

pub struct FastCGIConnectionIDFactory {
    next_connection_id: AtomicU64,
}

impl FastCGIConnectionIDFactory {
    pub fn new() -> Self {
        Self {
            next_connection_id: AtomicU64::new(1),
        }
    }

    pub fn new_connection_id(&self) -> FastCGIConnectionID {
        let connection_id = self.next_connection_id.fetch_add(1, Ordering::Relaxed);

        FastCGIConnectionID(connection_id)
    }
}

/// FastCGI request ids are only unique within one connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct FastCGIRequestID {
    connection_id: FastCGIConnectionID,
    request_id: u16,
}

impl FastCGIRequestID {
    pub fn new(connection_id: FastCGIConnectionID, request_id: u16) -> Self {
        Self {
            connection_id,
            request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ids_increase() {
        let factory = FastCGIConnectionIDFactory::new();

        assert_eq!(factory.new_connection_id(), FastCGIConnectionID(1));
        assert_eq!(factory.new_connection_id(), FastCGIConnectionID(2));
        assert_eq!(factory.new_connection_id(), FastCGIConnectionID(3));
    }
}
