//! Register reads and writes.
//!
//! WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Memory_and_Registers

use std::fmt;

use tracing::{debug, warn};

use crate::output::{Addressing, OutputReport, RegisterSpace, MAX_WRITE_SIZE};
use crate::result::{WiimoteError, WiimoteResult};

/// What happens with the data of a completed register read.
pub enum ReadResponder {
    /// Classify the extension identifier read from `0xA400FA`.
    IdentifyExtension,
    /// Check for an inactive MotionPlus at `0xA600FA`.
    IdentifyMotionPlus,
    /// Parse the factory accelerometer calibration from EEPROM `0x0016`.
    AccelerometerCalibration,
    /// Parse the MotionPlus gyroscope calibration from `0xA60020`.
    MotionPlusCalibration,
    /// Hand the data to the caller.
    Callback(Box<dyn FnOnce(&[u8]) + Send>),
}

impl fmt::Debug for ReadResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentifyExtension => f.write_str("IdentifyExtension"),
            Self::IdentifyMotionPlus => f.write_str("IdentifyMotionPlus"),
            Self::AccelerometerCalibration => f.write_str("AccelerometerCalibration"),
            Self::MotionPlusCalibration => f.write_str("MotionPlusCalibration"),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A register read waiting for its `0x21` reports.
#[derive(Debug)]
pub struct RegisterTransaction<R = ReadResponder> {
    addressing: Addressing,
    buffer: Vec<u8>,
    expected_offset: u32,
    responder: R,
}

impl<R> RegisterTransaction<R> {
    #[must_use]
    pub const fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// The address of the next byte the Wii remote is expected to send.
    #[must_use]
    pub const fn expected_offset(&self) -> u32 {
        self.expected_offset
    }

    /// The bytes received so far.
    #[must_use]
    pub fn received(&self) -> &[u8] {
        let received = self.expected_offset - self.addressing.address;
        &self.buffer[..received as usize]
    }

    #[must_use]
    pub const fn responder(&self) -> &R {
        &self.responder
    }

    fn end(&self) -> u32 {
        self.addressing.address + u32::from(self.addressing.size)
    }
}

/// Result of feeding the data of a `0x21` report to the open transaction.
#[derive(Debug)]
pub enum AppendOutcome<R = ReadResponder> {
    /// No transaction is open or the data does not fit into it. Nothing was changed.
    Rejected,
    /// The data was stored, more is expected.
    Pending,
    /// The read is complete and the transaction closed.
    Complete { responder: R, data: Vec<u8> },
}

/// Keeps track of the single register read a Wii remote can serve at a time.
#[derive(Debug)]
pub struct RegisterIo<R = ReadResponder> {
    pending: Option<RegisterTransaction<R>>,
}

impl<R> Default for RegisterIo<R> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<R> RegisterIo<R> {
    /// Opens a read transaction and returns the report requesting the data.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` without touching the open transaction if a read is still in progress.
    pub fn read(&mut self, addressing: Addressing, responder: R) -> WiimoteResult<OutputReport> {
        if let Some(pending) = &self.pending {
            warn!(
                pending_address = pending.addressing.address,
                requested_address = addressing.address,
                "register read rejected, another read is pending"
            );
            return Err(WiimoteError::ReadPending);
        }

        debug!(
            address = addressing.address,
            size = addressing.size,
            "register read"
        );
        self.pending = Some(RegisterTransaction {
            addressing,
            buffer: vec![0; usize::from(addressing.size)],
            expected_offset: addressing.address,
            responder,
        });
        Ok(OutputReport::ReadMemory(addressing))
    }

    /// Builds the report writing up to 16 bytes of `data`.
    ///
    /// # Errors
    ///
    /// Returns `WritePayloadTooLarge` for more than 16 bytes.
    pub fn write(space: RegisterSpace, address: u32, data: &[u8]) -> WiimoteResult<OutputReport> {
        if data.len() > MAX_WRITE_SIZE {
            warn!(size = data.len(), "register write rejected, payload too large");
            return Err(WiimoteError::WritePayloadTooLarge(data.len()));
        }

        let mut buffer = [0u8; MAX_WRITE_SIZE];
        buffer[..data.len()].copy_from_slice(data);
        #[allow(clippy::cast_possible_truncation)] // at most 16
        let addressing = Addressing::new(space, address, data.len() as u16);
        Ok(OutputReport::WriteMemory(addressing, buffer))
    }

    /// Stores `data` at the expected offset of the open transaction.
    #[allow(clippy::cast_possible_truncation)] // bounded by the u16 size
    pub fn append_data(&mut self, data: &[u8]) -> AppendOutcome<R> {
        let Some(pending) = self.pending.as_mut() else {
            return AppendOutcome::Rejected;
        };

        let start = (pending.expected_offset - pending.addressing.address) as usize;
        let end = start + data.len();
        if end > pending.buffer.len() {
            warn!(
                received = data.len(),
                remaining = pending.buffer.len() - start,
                "register data exceeds the requested size"
            );
            return AppendOutcome::Rejected;
        }

        pending.buffer[start..end].copy_from_slice(data);
        pending.expected_offset = pending.addressing.address + end as u32;

        if pending.expected_offset < pending.end() {
            return AppendOutcome::Pending;
        }
        match self.pending.take() {
            Some(transaction) => AppendOutcome::Complete {
                responder: transaction.responder,
                data: transaction.buffer,
            },
            None => AppendOutcome::Rejected,
        }
    }

    /// Drops the open transaction, e.g. after the Wii remote reported an error.
    pub fn abandon(&mut self) -> Option<RegisterTransaction<R>> {
        self.pending.take()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&RegisterTransaction<R>> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
