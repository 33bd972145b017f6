//! Hardware transport seam.
//!
//! The console only needs to start single-byte jobs; completion arrives as
//! interrupt callbacks into [`crate::bridge`].

/// One-byte-at-a-time UART job interface.
///
/// Both methods are called from interrupt context as well as from task
/// context and must not block.
pub trait SerialPort {
    /// Arm the receiver for the next byte.
    fn start_receive(&self);

    /// Start transmitting a single byte. Completion is reported by calling
    /// [`crate::bridge::OutboundPump::on_transmit_complete`].
    fn start_transmit(&self, byte: u8);
}

impl<P: SerialPort + ?Sized> SerialPort for &P {
    #[inline]
    fn start_receive(&self) {
        (**self).start_receive()
    }

    #[inline]
    fn start_transmit(&self, byte: u8) {
        (**self).start_transmit(byte)
    }
}
