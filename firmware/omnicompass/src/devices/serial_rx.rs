use arduino_hal::{
    hal::port::{PD0, PD1},
    hal::usart::Event,
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin,
    },
    Usart,
};
use avr_device::interrupt::{self, Mutex};
use core::{cell::RefCell, convert::Infallible};
use heapless::spsc::Queue;

pub type UnoSerial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// Slots in the receive queue; one slot is always free, so it holds up to
/// `RX_QUEUE_SLOTS - 1` bytes between ticks.
const RX_QUEUE_SLOTS: usize = 64;

static RX_QUEUE: Mutex<RefCell<Queue<u8, RX_QUEUE_SLOTS>>> =
    Mutex::new(RefCell::new(Queue::new()));

/// Receive side of the UART, buffered by the receive-complete interrupt.
///
/// The USART itself only holds two bytes, which is less than one response
/// takes to transmit. Every received byte is moved into a queue as soon as
/// it arrives, and the poll loop drains the queue at its own pace.
pub struct SerialRx {
    _private: (),
}

impl SerialRx {
    /// Enables the receive-complete interrupt and global interrupts.
    ///
    /// # Parameters
    ///
    /// - `serial`: The UART; it stays usable for transmitting.
    pub fn listen(serial: &mut UnoSerial) -> Self {
        serial.listen(Event::RxComplete);
        // SAFETY: the only handler is `USART_RX`, which shares state
        // through a critical-section mutex.
        unsafe { interrupt::enable() };
        Self { _private: () }
    }

    /// Takes the oldest received byte.
    ///
    /// # Returns
    ///
    /// - `Ok(byte)`: if a byte was waiting.
    /// - `Err(nb::Error::WouldBlock)`: if the queue is empty.
    pub fn read(&mut self) -> nb::Result<u8, Infallible> {
        interrupt::free(|cs| RX_QUEUE.borrow(cs).borrow_mut().dequeue())
            .ok_or(nb::Error::WouldBlock)
    }
}

#[avr_device::interrupt(atmega328p)]
fn USART_RX() {
    // SAFETY: only this handler reads the data register once receiving is
    // interrupt driven.
    let usart = unsafe { &*USART0::ptr() };
    let byte = usart.udr0().read().bits();
    interrupt::free(|cs| {
        // A full queue drops the byte.
        let _ = RX_QUEUE.borrow(cs).borrow_mut().enqueue(byte);
    });
}
