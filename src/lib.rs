#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

pub mod encoding;
pub mod object;
pub mod pdu;
pub mod util;

// Re-export main types without glob imports to avoid conflicts
pub use encoding::{DataType, EncodingError, OcaValue};
pub use object::{ClassId, CommandKind, ObjectError, OcaInstance, PropertyDescriptor};
pub use pdu::{
    parse, MessageType, Ocp1Command, Ocp1CommandDefinition, Ocp1KeepAlive, Ocp1Message,
    Ocp1Notification, Ocp1Response, PduError, StatusCode,
};

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

/// First byte of every OCP.1 PDU.
pub const OCP1_SYNC_BYTE: u8 = 0x3B;

/// The OCP.1 protocol version this crate speaks.
pub const OCP1_PROTOCOL_VERSION: u16 = 1;

/// Size of the PDU header including the sync byte.
pub const OCP1_HEADER_SIZE: usize = 10;

#[cfg(test)]
mod tests {
    use crate::object::OcaInstance;
    use crate::util::to_hex_string;
    use crate::{ClassId, DataType, MessageType, Ocp1KeepAlive, PduError};

    #[cfg(not(feature = "std"))]
    use alloc::format;

    #[test]
    fn test_no_std_types() {
        // Test that our types work in both std and no-std environments
        let message_type = MessageType::CommandResponseRequired;
        assert_eq!(u8::from(message_type), 1);

        let data_type = DataType::Float32;
        assert_eq!(data_type as u8, 10);

        let instance = OcaInstance::standard(ClassId::Gain);
        assert_eq!(instance.definition_level(), 4);
    }

    #[test]
    fn test_pdu_error() {
        let err = PduError::InvalidSyncByte(0x00);
        // In no-std, we can still format errors
        let _ = format!("{:?}", err);
    }

    #[test]
    fn test_framing_constants() {
        let bytes = Ocp1KeepAlive::new(5).to_bytes();
        assert_eq!(bytes[0], crate::OCP1_SYNC_BYTE);
        assert_eq!(bytes.len(), crate::OCP1_HEADER_SIZE + 2);
        assert_eq!(to_hex_string(&bytes), "3b00010000000b0400010005");
    }
}
