//! Publish/subscribe hub between the command decoder and the drawing surfaces.
//!
//! Dispatch is synchronous and single-threaded. Handlers run in registration
//! order over a snapshot of the handler list, so a handler may subscribe or
//! unsubscribe while an event is being delivered without disturbing the
//! current dispatch.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use crate::board::PenState;

/// Named category of semantic device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Movement,
    Mode,
    Pen,
    Jaw,
    Menu,
    Navigation,
    Confirm,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Movement,
        Channel::Mode,
        Channel::Pen,
        Channel::Jaw,
        Channel::Menu,
        Channel::Navigation,
        Channel::Confirm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Movement => "movement",
            Self::Mode => "mode",
            Self::Pen => "pen",
            Self::Jaw => "jaw",
            Self::Menu => "menu",
            Self::Navigation => "navigation",
            Self::Confirm => "confirm",
        }
    }
}

/// Which menu entry a confirm event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTarget {
    /// Explicit index supplied by the device (`E` frame)
    Index(u8),
    /// Whatever entry is currently highlighted (triple blink, `C` frame)
    Highlighted,
}

/// Semantic device event. Payloads are the raw device codes; validating
/// them is up to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Keypad-style direction code
    Movement(u8),
    /// Requested drawing mode code
    Mode(u8),
    /// Pen state computed by the decoder from the current one
    Pen(PenState),
    /// Seconds the jaw has been clenched
    Jaw(u8),
    /// Open the menu
    Menu,
    /// 0 = previous entry, 1 = next entry
    Navigation(u8),
    Confirm(ConfirmTarget),
}

impl Event {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Movement(_) => Channel::Movement,
            Self::Mode(_) => Channel::Mode,
            Self::Pen(_) => Channel::Pen,
            Self::Jaw(_) => Channel::Jaw,
            Self::Menu => Channel::Menu,
            Self::Navigation(_) => Channel::Navigation,
            Self::Confirm(_) => Channel::Confirm,
        }
    }
}

/// Event plus the instant its frame arrived.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    pub event: Event,
    pub received_at: Instant,
}

impl Envelope {
    pub fn new(event: Event, received_at: Instant) -> Self {
        Self { event, received_at }
    }
}

/// Subscriber callback. Identity is the `Rc` allocation, so keep a clone of
/// the handle to unsubscribe later.
pub type Handler = Rc<dyn Fn(&Envelope)>;

/// Fixed-channel event hub.
pub struct EventBus {
    channels: RefCell<HashMap<Channel, Vec<Handler>>>,
    closed: Cell<bool>,
}

impl EventBus {
    /// Creates a bus carrying only the given channels.
    pub fn new(channels: &[Channel]) -> Self {
        Self {
            channels: RefCell::new(channels.iter().map(|c| (*c, Vec::new())).collect()),
            closed: Cell::new(false),
        }
    }

    /// Creates a bus carrying every [`Channel`].
    pub fn with_all_channels() -> Self {
        Self::new(&Channel::ALL)
    }

    /// Registers a handler. Registering the same handle twice makes it run
    /// twice per event. Returns `false` if the channel is not carried.
    pub fn subscribe(&self, channel: Channel, handler: Handler) -> bool {
        match self.channels.borrow_mut().get_mut(&channel) {
            Some(handlers) => {
                handlers.push(handler);
                true
            }
            None => {
                log::debug!("Bus: ignoring subscription to unknown channel {}", channel.name());
                false
            }
        }
    }

    /// Removes every registration of exactly this handle. Returns how many
    /// registrations were removed.
    pub fn unsubscribe(&self, channel: Channel, handler: &Handler) -> usize {
        let mut channels = self.channels.borrow_mut();
        let Some(handlers) = channels.get_mut(&channel) else {
            return 0;
        };
        let before = handlers.len();
        handlers.retain(|h| !same_handler(h, handler));
        before - handlers.len()
    }

    /// Delivers an event to every handler on its channel.
    ///
    /// Returns the number of handlers invoked. Unknown channels and a closed
    /// bus deliver nothing.
    pub fn publish(&self, envelope: &Envelope) -> usize {
        if self.closed.get() {
            log::debug!("Bus closed; dropping {:?}", envelope.event);
            return 0;
        }

        let channel = envelope.event.channel();
        let snapshot: Vec<Handler> = match self.channels.borrow().get(&channel) {
            Some(handlers) => handlers.clone(),
            None => return 0,
        };

        for handler in &snapshot {
            handler(envelope);
        }
        snapshot.len()
    }

    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.channels.borrow().get(&channel).map_or(0, Vec::len)
    }

    /// Stops accepting events. A dispatch already running completes.
    pub fn close(&self) {
        self.closed.set(true);
    }

    /// Accepts events again after [`close`](Self::close).
    pub fn reopen(&self) {
        self.closed.set(false);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_all_channels()
    }
}

fn same_handler(a: &Handler, b: &Handler) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(event: Event) -> Envelope {
        Envelope::new(event, Instant::now())
    }

    fn counter() -> (Rc<Cell<usize>>, Handler) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let handler: Handler = Rc::new(move |_| seen.set(seen.get() + 1));
        (count, handler)
    }

    #[test]
    fn publish_reaches_only_the_event_channel() {
        let bus = EventBus::with_all_channels();
        let (moves, on_move) = counter();
        let (modes, on_mode) = counter();
        bus.subscribe(Channel::Movement, on_move);
        bus.subscribe(Channel::Mode, on_mode);

        assert_eq!(bus.publish(&envelope(Event::Movement(8))), 1);
        assert_eq!(moves.get(), 1);
        assert_eq!(modes.get(), 0);
    }

    #[test]
    fn double_subscription_runs_twice() {
        let bus = EventBus::with_all_channels();
        let (count, handler) = counter();
        bus.subscribe(Channel::Menu, Rc::clone(&handler));
        bus.subscribe(Channel::Menu, Rc::clone(&handler));

        bus.publish(&envelope(Event::Menu));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn unsubscribe_removes_only_that_handle() {
        let bus = EventBus::with_all_channels();
        let (first_count, first) = counter();
        let (second_count, second) = counter();
        bus.subscribe(Channel::Jaw, Rc::clone(&first));
        bus.subscribe(Channel::Jaw, Rc::clone(&second));

        assert_eq!(bus.unsubscribe(Channel::Jaw, &first), 1);
        bus.publish(&envelope(Event::Jaw(3)));
        assert_eq!(first_count.get(), 0);
        assert_eq!(second_count.get(), 1);
    }

    #[test]
    fn unknown_channel_is_a_silent_no_op() {
        let bus = EventBus::new(&[Channel::Movement]);
        let (count, handler) = counter();
        assert!(!bus.subscribe(Channel::Pen, Rc::clone(&handler)));
        assert_eq!(bus.publish(&envelope(Event::Pen(PenState::Pen))), 0);
        assert_eq!(bus.unsubscribe(Channel::Pen, &handler), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = EventBus::with_all_channels();
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            bus.subscribe(Channel::Navigation, Rc::new(move |_| order.borrow_mut().push(id)));
        }
        bus.publish(&envelope(Event::Navigation(1)));
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribe_during_dispatch_uses_stable_snapshot() {
        let bus = Rc::new(EventBus::with_all_channels());
        let (late_count, late) = counter();

        let remover: Handler = {
            let bus = Rc::clone(&bus);
            let late = Rc::clone(&late);
            Rc::new(move |_| {
                bus.unsubscribe(Channel::Movement, &late);
            })
        };
        bus.subscribe(Channel::Movement, remover);
        bus.subscribe(Channel::Movement, Rc::clone(&late));

        // The snapshot still includes `late` for this dispatch
        bus.publish(&envelope(Event::Movement(8)));
        assert_eq!(late_count.get(), 1);

        bus.publish(&envelope(Event::Movement(8)));
        assert_eq!(late_count.get(), 1);
        assert_eq!(bus.subscriber_count(Channel::Movement), 1);
    }

    #[test]
    fn subscribe_during_dispatch_waits_for_next_publish() {
        let bus = Rc::new(EventBus::with_all_channels());
        let (late_count, late) = counter();

        let adder: Handler = {
            let bus = Rc::clone(&bus);
            let added = Cell::new(false);
            Rc::new(move |_| {
                if !added.replace(true) {
                    bus.subscribe(Channel::Movement, Rc::clone(&late));
                }
            })
        };
        bus.subscribe(Channel::Movement, adder);

        assert_eq!(bus.publish(&envelope(Event::Movement(8))), 1);
        assert_eq!(late_count.get(), 0);
        assert_eq!(bus.subscriber_count(Channel::Movement), 2);

        assert_eq!(bus.publish(&envelope(Event::Movement(9))), 2);
        assert_eq!(late_count.get(), 1);
        assert_eq!(bus.subscriber_count(Channel::Movement), 2);
    }

    #[test]
    fn closed_bus_drops_events() {
        let bus = EventBus::with_all_channels();
        let (count, handler) = counter();
        bus.subscribe(Channel::Menu, handler);

        bus.close();
        assert_eq!(bus.publish(&envelope(Event::Menu)), 0);
        assert_eq!(count.get(), 0);

        bus.reopen();
        bus.publish(&envelope(Event::Menu));
        assert_eq!(count.get(), 1);
    }
}
