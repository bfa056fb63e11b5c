//! OCP.1 Protocol Data Unit Module
//!
//! This module assembles and parses the OCP.1 PDUs that carry AES70
//! control messages over a byte stream. Every PDU starts with a sync byte
//! and a fixed 9-byte header, followed by one message whose layout depends
//! on the message type. All integers are big-endian.
//!
//! # Frame layout
//!
//! ```text
//! offset  size  field
//!      0     1  sync byte (0x3B)
//!      1     2  protocol version (1)
//!      3     4  message size (header + payload, sync byte excluded)
//!      7     1  message type
//!      8     2  message count (always 1 here)
//!     10     n  payload
//! ```
//!
//! Command payloads carry (size, handle, target ONo, method ID, parameter
//! count, parameters); responses carry (size, handle, status, parameter
//! count, parameters); notifications wrap the emitting object and event ID
//! in the standard context/event envelope. Keep-alives carry the
//! heartbeat interval in seconds.
//!
//! # Overview
//!
//! - [`Ocp1Command`] / [`Ocp1Response`] / [`Ocp1Notification`] /
//!   [`Ocp1KeepAlive`]: message builders producing complete framed buffers
//! - [`parse`]: the inverse direction, with structural validation
//! - [`command_for_property`]: ties the class model to the codec and
//!   rejects inconsistent property selections before encoding
//!
//! # Example
//!
//! ```
//! use ocp1_rs::pdu::{parse, Ocp1Command, Ocp1CommandDefinition, Ocp1Message};
//! use ocp1_rs::encoding::{DataType, OcaValue};
//!
//! let definition = Ocp1CommandDefinition::with_params(
//!     10000,
//!     DataType::Float32,
//!     4,                                        // OcaGain definition level
//!     2,                                        // SetGain method index
//!     1,
//!     OcaValue::Float32(-6.0).encode().unwrap(),
//! );
//! let command = Ocp1Command::with_handle(definition, 1).unwrap();
//! let bytes = command.to_bytes();
//!
//! match parse(&bytes).unwrap() {
//!     Ocp1Message::Command { target_ono, method_index, .. } => {
//!         assert_eq!(target_ono, 10000);
//!         assert_eq!(method_index, 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

#[cfg(feature = "std")]
use std::error::Error;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::sync::atomic::{AtomicU32, Ordering};

use crate::encoding::{
    self, decode_string, DataType, EncodingError, OcaValue,
};
use crate::object::{CommandKind, ObjectError, PropertyDescriptor};
use crate::{OCP1_HEADER_SIZE, OCP1_PROTOCOL_VERSION, OCP1_SYNC_BYTE};

/// Object number of the standard OcaSubscriptionManager.
pub const OCA_SUBSCRIPTION_MANAGER_ONO: u32 = 4;

/// Definition level of the AddSubscription method on the manager.
pub const ADD_SUBSCRIPTION_DEF_LEVEL: u16 = 3;

/// Method index of the AddSubscription method on the manager.
pub const ADD_SUBSCRIPTION_METHOD_INDEX: u16 = 1;

/// Fixed method ID used to deliver notifications to a subscriber.
const NOTIFICATION_DEF_LEVEL: u16 = 3;
const NOTIFICATION_METHOD_INDEX: u16 = 1;

// Per-kind payload sizes excluding parameter data.
const COMMAND_FIXED_SIZE: usize = 17;
const RESPONSE_FIXED_SIZE: usize = 10;
const NOTIFICATION_FIXED_SIZE: usize = 23;
const KEEPALIVE_PAYLOAD_SIZE: usize = 2;

/// Result type for PDU operations
#[cfg(feature = "std")]
pub type Result<T> = std::result::Result<T, PduError>;

#[cfg(not(feature = "std"))]
pub type Result<T> = core::result::Result<T, PduError>;

/// Errors that can occur while building or parsing OCP.1 PDUs
#[derive(Debug, Clone, PartialEq)]
pub enum PduError {
    /// Buffer shorter than the minimum for its message kind
    TooShort { minimum: usize, actual: usize },
    /// First byte is not the OCP.1 sync byte
    InvalidSyncByte(u8),
    /// Protocol version other than 1
    UnsupportedVersion(u16),
    /// Size field inconsistent with the actual buffer
    LengthMismatch { declared: usize, actual: usize },
    /// Message type byte outside the defined range
    UnknownMessageType(u8),
    /// PDUs carrying more than one message are not supported
    UnsupportedMessageCount(u16),
    /// Payload ends before its declared contents
    TruncatedPayload,
    /// Parameter bytes inconsistent with the declared count/type
    ParameterSizeMismatch { expected: usize, actual: usize },
    /// Supplied value does not match the property's data type
    ParameterTypeMismatch { expected: DataType, actual: DataType },
    /// Set command built without a value
    MissingValue,
    /// Class model rejected the request
    Object(ObjectError),
    /// Primitive codec rejected the request
    Encoding(EncodingError),
}

impl fmt::Display for PduError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduError::TooShort { minimum, actual } => {
                write!(f, "Buffer too short: {} bytes, need {}", actual, minimum)
            }
            PduError::InvalidSyncByte(byte) => write!(f, "Invalid sync byte: 0x{:02x}", byte),
            PduError::UnsupportedVersion(version) => {
                write!(f, "Unsupported protocol version: {}", version)
            }
            PduError::LengthMismatch { declared, actual } => {
                write!(f, "Size field {} does not match {} bytes", declared, actual)
            }
            PduError::UnknownMessageType(byte) => write!(f, "Unknown message type: {}", byte),
            PduError::UnsupportedMessageCount(count) => {
                write!(f, "Unsupported message count: {}", count)
            }
            PduError::TruncatedPayload => write!(f, "Payload truncated"),
            PduError::ParameterSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Parameter data is {} bytes, expected {}",
                    actual, expected
                )
            }
            PduError::ParameterTypeMismatch { expected, actual } => {
                write!(f, "Value type {} does not match property type {}", actual, expected)
            }
            PduError::MissingValue => write!(f, "Set command requires a value"),
            PduError::Object(e) => write!(f, "Object error: {}", e),
            PduError::Encoding(e) => write!(f, "Encoding error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl Error for PduError {}

impl From<ObjectError> for PduError {
    fn from(e: ObjectError) -> Self {
        PduError::Object(e)
    }
}

impl From<EncodingError> for PduError {
    fn from(e: EncodingError) -> Self {
        PduError::Encoding(e)
    }
}

crate::generate_wire_enum! {
    /// OCP.1 message types.
    ///
    /// `Command` is fire-and-forget; `CommandResponseRequired` is the
    /// normal request form. Unassigned values are reserved by AES70.
    MessageType {
        Command = 0,
        CommandResponseRequired = 1,
        Notification = 2,
        Response = 3,
        KeepAlive = 4,
    },
    u8
}

crate::generate_wire_enum! {
    /// AES70 status codes carried by responses.
    StatusCode {
        Ok = 0,
        ProtocolVersionError = 1,
        DeviceError = 2,
        Locked = 3,
        BadFormat = 4,
        BadONo = 5,
        ParameterError = 6,
        ParameterOutOfRange = 7,
        NotImplemented = 8,
        InvalidRequest = 9,
        ProcessingFailed = 10,
        BadMethod = 11,
        PartiallySucceeded = 12,
        Timeout = 13,
        BufferOverflow = 14,
        PermissionDenied = 15,
    },
    u8
}

impl StatusCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

static NEXT_HANDLE: AtomicU32 = AtomicU32::new(1);

/// Produce a fresh command handle.
///
/// Handles only correlate commands with responses, so a process-wide
/// counter is enough; callers needing reproducible strings override the
/// handle explicitly.
pub fn next_handle() -> u32 {
    NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
}

/// OCP.1 PDU header: sync byte plus the 9-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ocp1Header {
    pub message_type: MessageType,
    /// Header + payload size, sync byte excluded
    pub message_size: u32,
}

impl Ocp1Header {
    pub fn new(message_type: MessageType, payload_size: usize) -> Self {
        Self {
            message_type,
            message_size: (OCP1_HEADER_SIZE - 1 + payload_size) as u32,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(OCP1_HEADER_SIZE);
        buffer.push(OCP1_SYNC_BYTE);
        encoding::encode_u16(&mut buffer, OCP1_PROTOCOL_VERSION);
        encoding::encode_u32(&mut buffer, self.message_size);
        encoding::encode_u8(&mut buffer, u8::from(self.message_type));
        encoding::encode_u16(&mut buffer, 1); // message count
        buffer
    }

    /// Parse and validate the header of a complete PDU buffer.
    pub fn parse(data: &[u8]) -> Result<Ocp1Header> {
        if data.len() < OCP1_HEADER_SIZE {
            return Err(PduError::TooShort {
                minimum: OCP1_HEADER_SIZE,
                actual: data.len(),
            });
        }
        if data[0] != OCP1_SYNC_BYTE {
            return Err(PduError::InvalidSyncByte(data[0]));
        }

        let version = u16::from_be_bytes([data[1], data[2]]);
        if version != OCP1_PROTOCOL_VERSION {
            return Err(PduError::UnsupportedVersion(version));
        }

        let message_size = u32::from_be_bytes([data[3], data[4], data[5], data[6]]);
        if message_size as usize != data.len() - 1 {
            return Err(PduError::LengthMismatch {
                declared: message_size as usize,
                actual: data.len() - 1,
            });
        }

        let message_type = MessageType::from(data[7]);
        if let MessageType::Reserved(value) = message_type {
            return Err(PduError::UnknownMessageType(value.value()));
        }

        let message_count = u16::from_be_bytes([data[8], data[9]]);
        if message_count != 1 {
            return Err(PduError::UnsupportedMessageCount(message_count));
        }

        Ok(Ocp1Header {
            message_type,
            message_size,
        })
    }
}

/// Everything needed to form a command, minus handle and framing.
///
/// Mirrors the shape a caller assembles from a property selection: target
/// object, the property's wire data type, and the method coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ocp1CommandDefinition {
    pub target_ono: u32,
    pub data_type: DataType,
    pub def_level: u16,
    pub method_index: u16,
    pub param_count: u8,
    pub param_data: Vec<u8>,
}

impl Ocp1CommandDefinition {
    /// Definition for a parameterless command (e.g. a Get).
    pub fn new(target_ono: u32, data_type: DataType, def_level: u16, method_index: u16) -> Self {
        Self {
            target_ono,
            data_type,
            def_level,
            method_index,
            param_count: 0,
            param_data: Vec::new(),
        }
    }

    /// Definition for a command carrying parameter data (e.g. a Set).
    pub fn with_params(
        target_ono: u32,
        data_type: DataType,
        def_level: u16,
        method_index: u16,
        param_count: u8,
        param_data: Vec<u8>,
    ) -> Self {
        Self {
            target_ono,
            data_type,
            def_level,
            method_index,
            param_count,
            param_data,
        }
    }

    /// Derive the AddSubscription command for this definition.
    ///
    /// The receiver's `def_level`/`method_index` are read as the event
    /// identifier of the property to subscribe to; the derived command
    /// targets the subscription manager with the fixed AddSubscription
    /// method and encodes (emitter, event ID) plus the standard
    /// subscriber/context/delivery-mode tail with conventional values, so
    /// generated strings are deterministic.
    pub fn add_subscription_command(&self) -> Ocp1CommandDefinition {
        let mut param_data = Vec::new();

        // Event: emitter ONo + event ID.
        encoding::encode_u32(&mut param_data, self.target_ono);
        encoding::encode_u16(&mut param_data, self.def_level);
        encoding::encode_u16(&mut param_data, self.method_index);

        // Subscriber method: left to the receiving controller.
        encoding::encode_u32(&mut param_data, 0);
        encoding::encode_u16(&mut param_data, 0);
        encoding::encode_u16(&mut param_data, 0);

        // Empty subscriber context.
        encoding::encode_u16(&mut param_data, 0);

        // Delivery mode: reliable.
        encoding::encode_u8(&mut param_data, 1);

        // Empty destination info.
        encoding::encode_u16(&mut param_data, 0);

        Ocp1CommandDefinition::with_params(
            OCA_SUBSCRIPTION_MANAGER_ONO,
            DataType::None,
            ADD_SUBSCRIPTION_DEF_LEVEL,
            ADD_SUBSCRIPTION_METHOD_INDEX,
            5,
            param_data,
        )
    }

    /// Check that the parameter block is internally consistent with the
    /// declared count and data type before any bytes are framed.
    fn validate(&self) -> Result<()> {
        if self.param_count == 0 {
            if !self.param_data.is_empty() {
                return Err(PduError::ParameterSizeMismatch {
                    expected: 0,
                    actual: self.param_data.len(),
                });
            }
            return Ok(());
        }

        if self.param_data.is_empty() {
            return Err(PduError::ParameterSizeMismatch {
                expected: 1,
                actual: 0,
            });
        }

        // A single parameter of a known type must match its wire width.
        // Multi-parameter blocks have no single declared type to check.
        if self.param_count == 1 {
            if let Some(size) = self.data_type.wire_size() {
                if self.param_data.len() != size {
                    return Err(PduError::ParameterSizeMismatch {
                        expected: size,
                        actual: self.param_data.len(),
                    });
                }
            } else if self.data_type == DataType::String {
                decode_string(&self.param_data)?;
            }
        }

        Ok(())
    }
}

/// A framed OCP.1 command.
///
/// Commands default to requiring a response and auto-generate their
/// handle; both can be overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct Ocp1Command {
    definition: Ocp1CommandDefinition,
    handle: u32,
    response_required: bool,
}

impl Ocp1Command {
    /// Command requiring a response, with an auto-generated handle.
    pub fn new(definition: Ocp1CommandDefinition) -> Result<Self> {
        Self::build(definition, next_handle(), true)
    }

    /// Command requiring a response, with a caller-chosen handle.
    pub fn with_handle(definition: Ocp1CommandDefinition, handle: u32) -> Result<Self> {
        Self::build(definition, handle, true)
    }

    /// Fire-and-forget command; no response will be sent.
    pub fn fire_and_forget(definition: Ocp1CommandDefinition) -> Result<Self> {
        Self::build(definition, next_handle(), false)
    }

    fn build(definition: Ocp1CommandDefinition, handle: u32, response_required: bool) -> Result<Self> {
        definition.validate()?;
        Ok(Self {
            definition,
            handle,
            response_required,
        })
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    /// Replace the handle, e.g. with a user-chosen value for reproducible
    /// test strings.
    pub fn set_handle(&mut self, handle: u32) {
        self.handle = handle;
    }

    pub fn definition(&self) -> &Ocp1CommandDefinition {
        &self.definition
    }

    /// Serialize to a complete framed PDU.
    pub fn to_bytes(&self) -> Vec<u8> {
        let definition = &self.definition;
        let payload_size = COMMAND_FIXED_SIZE + definition.param_data.len();
        let message_type = if self.response_required {
            MessageType::CommandResponseRequired
        } else {
            MessageType::Command
        };

        let mut buffer = Ocp1Header::new(message_type, payload_size).to_bytes();
        encoding::encode_u32(&mut buffer, payload_size as u32);
        encoding::encode_u32(&mut buffer, self.handle);
        encoding::encode_u32(&mut buffer, definition.target_ono);
        encoding::encode_u16(&mut buffer, definition.def_level);
        encoding::encode_u16(&mut buffer, definition.method_index);
        encoding::encode_u8(&mut buffer, definition.param_count);
        buffer.extend_from_slice(&definition.param_data);

        log::trace!(
            "built {:?} for ONo {} method {}.{} ({} bytes)",
            message_type,
            definition.target_ono,
            definition.def_level,
            definition.method_index,
            buffer.len()
        );
        buffer
    }
}

/// A framed OCP.1 response.
#[derive(Debug, Clone, PartialEq)]
pub struct Ocp1Response {
    pub handle: u32,
    pub status: StatusCode,
    pub param_count: u8,
    pub param_data: Vec<u8>,
}

impl Ocp1Response {
    pub fn new(
        handle: u32,
        status: StatusCode,
        param_count: u8,
        param_data: Vec<u8>,
    ) -> Result<Self> {
        if (param_count == 0) != param_data.is_empty() {
            return Err(PduError::ParameterSizeMismatch {
                expected: if param_count == 0 { 0 } else { 1 },
                actual: param_data.len(),
            });
        }
        Ok(Self {
            handle,
            status,
            param_count,
            param_data,
        })
    }

    /// Serialize to a complete framed PDU.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload_size = RESPONSE_FIXED_SIZE + self.param_data.len();
        let mut buffer = Ocp1Header::new(MessageType::Response, payload_size).to_bytes();
        encoding::encode_u32(&mut buffer, payload_size as u32);
        encoding::encode_u32(&mut buffer, self.handle);
        encoding::encode_u8(&mut buffer, u8::from(self.status));
        encoding::encode_u8(&mut buffer, self.param_count);
        buffer.extend_from_slice(&self.param_data);
        buffer
    }
}

/// A framed OCP.1 notification.
///
/// On the wire the parameters are wrapped in the standard envelope: an
/// empty subscriber context (counted as the first parameter) followed by
/// the emitting object, the event ID, and the event parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Ocp1Notification {
    pub emitter_ono: u32,
    pub def_level: u16,
    pub event_index: u16,
    pub param_count: u8,
    pub param_data: Vec<u8>,
}

impl Ocp1Notification {
    pub fn new(
        emitter_ono: u32,
        def_level: u16,
        event_index: u16,
        param_count: u8,
        param_data: Vec<u8>,
    ) -> Result<Self> {
        if (param_count == 0) != param_data.is_empty() {
            return Err(PduError::ParameterSizeMismatch {
                expected: if param_count == 0 { 0 } else { 1 },
                actual: param_data.len(),
            });
        }
        // The context occupies one slot of the wire parameter count.
        if param_count == u8::MAX {
            return Err(PduError::Encoding(EncodingError::ValueOutOfRange));
        }
        Ok(Self {
            emitter_ono,
            def_level,
            event_index,
            param_count,
            param_data,
        })
    }

    /// Serialize to a complete framed PDU.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload_size = NOTIFICATION_FIXED_SIZE + self.param_data.len();
        let mut buffer = Ocp1Header::new(MessageType::Notification, payload_size).to_bytes();
        encoding::encode_u32(&mut buffer, payload_size as u32);
        encoding::encode_u32(&mut buffer, self.emitter_ono);
        encoding::encode_u16(&mut buffer, NOTIFICATION_DEF_LEVEL);
        encoding::encode_u16(&mut buffer, NOTIFICATION_METHOD_INDEX);
        encoding::encode_u8(&mut buffer, self.param_count + 1); // context included
        encoding::encode_u16(&mut buffer, 0); // empty context
        encoding::encode_u32(&mut buffer, self.emitter_ono);
        encoding::encode_u16(&mut buffer, self.def_level);
        encoding::encode_u16(&mut buffer, self.event_index);
        buffer.extend_from_slice(&self.param_data);
        buffer
    }
}

/// A framed OCP.1 keep-alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ocp1KeepAlive {
    pub heartbeat_seconds: u16,
}

impl Ocp1KeepAlive {
    pub fn new(heartbeat_seconds: u16) -> Self {
        Self { heartbeat_seconds }
    }

    /// Serialize to a complete framed PDU.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer =
            Ocp1Header::new(MessageType::KeepAlive, KEEPALIVE_PAYLOAD_SIZE).to_bytes();
        encoding::encode_u16(&mut buffer, self.heartbeat_seconds);
        buffer
    }
}

/// Build an AddSubscription command for a property's change event.
///
/// The command always targets the subscription manager with the fixed
/// AddSubscription method, regardless of the property's own get/set
/// method indices. The handle is auto-generated; use
/// [`Ocp1Command::set_handle`] to override it.
pub fn add_subscription_command(
    target_ono: u32,
    data_type: DataType,
    def_level: u16,
    property_index: u16,
) -> Result<Ocp1Command> {
    let definition = Ocp1CommandDefinition::new(target_ono, data_type, def_level, property_index)
        .add_subscription_command();
    Ocp1Command::new(definition)
}

/// Build the command for a property selection.
///
/// Inconsistent selections are rejected before any encoding happens:
/// a Get/Set against a property lacking the accessor, a Set without a
/// value, or a value whose type does not match the property.
pub fn command_for_property(
    target_ono: u32,
    property: &PropertyDescriptor,
    kind: CommandKind,
    value: Option<&OcaValue>,
) -> Result<Ocp1Command> {
    match kind {
        CommandKind::Get => {
            let method_index = property.getter_index()?;
            let definition = Ocp1CommandDefinition::new(
                target_ono,
                property.data_type,
                property.definition_level,
                method_index,
            );
            Ocp1Command::new(definition)
        }
        CommandKind::Set => {
            let method_index = property.setter_index()?;
            let value = value.ok_or(PduError::MissingValue)?;
            if value.data_type() != property.data_type {
                return Err(PduError::ParameterTypeMismatch {
                    expected: property.data_type,
                    actual: value.data_type(),
                });
            }
            let definition = Ocp1CommandDefinition::with_params(
                target_ono,
                property.data_type,
                property.definition_level,
                method_index,
                1,
                value.encode()?,
            );
            Ocp1Command::new(definition)
        }
        CommandKind::AddSubscription => add_subscription_command(
            target_ono,
            property.data_type,
            property.definition_level,
            property.property_index,
        ),
    }
}

/// Build the notification a device would emit for a property change.
pub fn notification_for_property(
    emitter_ono: u32,
    property: &PropertyDescriptor,
    value: &OcaValue,
) -> Result<Ocp1Notification> {
    if value.data_type() != property.data_type {
        return Err(PduError::ParameterTypeMismatch {
            expected: property.data_type,
            actual: value.data_type(),
        });
    }
    Ocp1Notification::new(
        emitter_ono,
        property.definition_level,
        property.property_index,
        1,
        value.encode()?,
    )
}

/// A parsed OCP.1 message.
#[derive(Debug, Clone, PartialEq)]
pub enum Ocp1Message {
    Command {
        response_required: bool,
        handle: u32,
        target_ono: u32,
        def_level: u16,
        method_index: u16,
        param_count: u8,
        param_data: Vec<u8>,
    },
    Response {
        handle: u32,
        status: StatusCode,
        param_count: u8,
        param_data: Vec<u8>,
    },
    Notification {
        emitter_ono: u32,
        def_level: u16,
        event_index: u16,
        param_count: u8,
        param_data: Vec<u8>,
    },
    KeepAlive {
        heartbeat_seconds: u16,
    },
}

/// Parse a complete OCP.1 PDU buffer into a structured message.
///
/// Rejects buffers that are too short, have a size field inconsistent
/// with the actual buffer, or carry an unrecognized message type, without
/// ever reading past the end of the buffer.
pub fn parse(data: &[u8]) -> Result<Ocp1Message> {
    let header = Ocp1Header::parse(data)?;
    let payload = &data[OCP1_HEADER_SIZE..];

    let message = match header.message_type {
        MessageType::Command | MessageType::CommandResponseRequired => {
            parse_command(
                payload,
                header.message_type == MessageType::CommandResponseRequired,
            )?
        }
        MessageType::Response => parse_response(payload)?,
        MessageType::Notification => parse_notification(payload)?,
        MessageType::KeepAlive => parse_keepalive(payload)?,
        MessageType::Reserved(_) => unreachable!("rejected by header parse"),
    };

    log::trace!("parsed {:?} message ({} bytes)", header.message_type, data.len());
    Ok(message)
}

fn check_payload_size(payload: &[u8], fixed_size: usize) -> Result<()> {
    if payload.len() < fixed_size {
        return Err(PduError::TooShort {
            minimum: OCP1_HEADER_SIZE + fixed_size,
            actual: OCP1_HEADER_SIZE + payload.len(),
        });
    }
    let declared = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;
    if declared != payload.len() {
        return Err(PduError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn parse_command(payload: &[u8], response_required: bool) -> Result<Ocp1Message> {
    check_payload_size(payload, COMMAND_FIXED_SIZE)?;
    Ok(Ocp1Message::Command {
        response_required,
        handle: u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]),
        target_ono: u32::from_be_bytes([payload[8], payload[9], payload[10], payload[11]]),
        def_level: u16::from_be_bytes([payload[12], payload[13]]),
        method_index: u16::from_be_bytes([payload[14], payload[15]]),
        param_count: payload[16],
        param_data: payload[COMMAND_FIXED_SIZE..].to_vec(),
    })
}

fn parse_response(payload: &[u8]) -> Result<Ocp1Message> {
    check_payload_size(payload, RESPONSE_FIXED_SIZE)?;
    Ok(Ocp1Message::Response {
        handle: u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]),
        status: StatusCode::from(payload[8]),
        param_count: payload[9],
        param_data: payload[RESPONSE_FIXED_SIZE..].to_vec(),
    })
}

fn parse_notification(payload: &[u8]) -> Result<Ocp1Message> {
    check_payload_size(payload, NOTIFICATION_FIXED_SIZE)?;

    let wire_param_count = payload[12];
    let context_size = u16::from_be_bytes([payload[13], payload[14]]) as usize;

    // The event record follows the variable-size context.
    let event_offset = 15usize.checked_add(context_size).ok_or(PduError::TruncatedPayload)?;
    let params_offset = event_offset + 8;
    if payload.len() < params_offset {
        return Err(PduError::TruncatedPayload);
    }

    Ok(Ocp1Message::Notification {
        emitter_ono: u32::from_be_bytes([
            payload[event_offset],
            payload[event_offset + 1],
            payload[event_offset + 2],
            payload[event_offset + 3],
        ]),
        def_level: u16::from_be_bytes([payload[event_offset + 4], payload[event_offset + 5]]),
        event_index: u16::from_be_bytes([payload[event_offset + 6], payload[event_offset + 7]]),
        param_count: wire_param_count.saturating_sub(1), // context excluded
        param_data: payload[params_offset..].to_vec(),
    })
}

fn parse_keepalive(payload: &[u8]) -> Result<Ocp1Message> {
    check_payload_size_exact(payload, KEEPALIVE_PAYLOAD_SIZE)?;
    Ok(Ocp1Message::KeepAlive {
        heartbeat_seconds: u16::from_be_bytes([payload[0], payload[1]]),
    })
}

fn check_payload_size_exact(payload: &[u8], size: usize) -> Result<()> {
    if payload.len() != size {
        return Err(PduError::LengthMismatch {
            declared: size,
            actual: payload.len(),
        });
    }
    Ok(())
}
