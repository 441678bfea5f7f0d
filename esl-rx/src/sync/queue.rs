//! Bounded single-producer single-consumer frame queue.
//!
//! The producer side never blocks: when the queue is full the new frame is
//! dropped and counted. The consumer side waits asynchronously for the next
//! frame, and the waker is kept behind a critical section so the producer
//! may run in interrupt context.
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Poll, Waker};

use critical_section::Mutex;
use heapless::spsc::{Consumer, Producer, Queue};

use crate::RawFrame;

struct Shared {
    waker: Option<Waker>,
    closed: bool,
    dropped: usize,
}

impl Shared {
    const fn new() -> Self {
        Self {
            waker: None,
            closed: false,
            dropped: 0,
        }
    }
}

/// A bounded frame queue holding up to `N - 1` frames.
pub struct FrameQueue<const N: usize> {
    queue: Queue<RawFrame, N>,
    shared: Mutex<RefCell<Shared>>,
}

impl<const N: usize> FrameQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            shared: Mutex::new(RefCell::new(Shared::new())),
        }
    }

    /// Return the number of frames the queue can hold.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Split the queue in its sending and receiving half.
    pub fn split(&mut self) -> (FrameSender<'_, N>, FrameReceiver<'_, N>) {
        // Exclusive access here, so the state of a previous split can be reset.
        *self.shared.get_mut().get_mut() = Shared::new();

        let (producer, consumer) = self.queue.split();
        let shared = &self.shared;

        (
            FrameSender { producer, shared },
            FrameReceiver { consumer, shared },
        )
    }
}

impl<const N: usize> Default for FrameQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The sending half of a [`FrameQueue`]. Dropping it closes the queue.
pub struct FrameSender<'a, const N: usize> {
    producer: Producer<'a, RawFrame, N>,
    shared: &'a Mutex<RefCell<Shared>>,
}

impl<const N: usize> FrameSender<'_, N> {
    /// Enqueue a frame without blocking.
    ///
    /// Returns `false` when the queue was full. The frame is then dropped and
    /// counted.
    pub fn send(&mut self, frame: RawFrame) -> bool {
        let accepted = self.producer.enqueue(frame).is_ok();

        let waker = critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            if !accepted {
                shared.dropped += 1;
            }
            shared.waker.take()
        });

        if let Some(waker) = waker {
            waker.wake();
        }

        accepted
    }

    /// Return the number of frames dropped on a full queue.
    pub fn dropped(&self) -> usize {
        critical_section::with(|cs| self.shared.borrow_ref(cs).dropped)
    }
}

impl<const N: usize> Drop for FrameSender<'_, N> {
    fn drop(&mut self) {
        let waker = critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            shared.closed = true;
            shared.waker.take()
        });

        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// The receiving half of a [`FrameQueue`].
pub struct FrameReceiver<'a, const N: usize> {
    consumer: Consumer<'a, RawFrame, N>,
    shared: &'a Mutex<RefCell<Shared>>,
}

impl<const N: usize> FrameReceiver<'_, N> {
    /// Wait for the next frame.
    ///
    /// Returns `None` once the sender is dropped and every queued frame has
    /// been received.
    pub async fn receive(&mut self) -> Option<RawFrame> {
        poll_fn(|cx| {
            // Register before looking at the queue, so a frame sent in between
            // still wakes us.
            let closed = critical_section::with(|cs| {
                let mut shared = self.shared.borrow_ref_mut(cs);
                match &mut shared.waker {
                    Some(waker) => waker.clone_from(cx.waker()),
                    waker @ None => *waker = Some(cx.waker().clone()),
                }
                shared.closed
            });

            match self.consumer.dequeue() {
                Some(frame) => Poll::Ready(Some(frame)),
                None if closed => Poll::Ready(None),
                None => Poll::Pending,
            }
        })
        .await
    }

    /// Take the next frame if one is available.
    pub fn try_receive(&mut self) -> Option<RawFrame> {
        self.consumer.dequeue()
    }

    /// Return the number of frames dropped on a full queue.
    pub fn dropped(&self) -> usize {
        critical_section::with(|cs| self.shared.borrow_ref(cs).dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::FutureExt as _;

    fn frame(sequence_number: u8) -> RawFrame {
        RawFrame::new(&[0x02, 0x00, sequence_number, 0x00, 0x00]).unwrap()
    }

    #[test]
    fn receipt_order() {
        async {
            let mut queue = FrameQueue::<4>::new();
            let (mut tx, mut rx) = queue.split();

            for i in 0..3 {
                assert!(tx.send(frame(i)));
            }

            for i in 0..3 {
                assert_eq!(rx.receive().await.unwrap().as_bytes()[2], i);
            }
            assert!(rx.try_receive().is_none());
        }
        .block_on();
    }

    #[test]
    fn drop_on_full() {
        let mut queue = FrameQueue::<4>::new();
        assert_eq!(queue.capacity(), 3);
        let (mut tx, mut rx) = queue.split();

        for i in 0..3 {
            assert!(tx.send(frame(i)));
        }
        assert!(!tx.send(frame(3)));
        assert!(!tx.send(frame(4)));
        assert_eq!(tx.dropped(), 2);
        assert_eq!(rx.dropped(), 2);

        // The queued frames are kept, the new ones are dropped.
        for i in 0..3 {
            assert_eq!(rx.try_receive().unwrap().as_bytes()[2], i);
        }
        assert!(rx.try_receive().is_none());

        assert!(tx.send(frame(5)));
        assert_eq!(rx.try_receive().unwrap().as_bytes()[2], 5);
    }

    #[test]
    fn closed_after_drain() {
        async {
            let mut queue = FrameQueue::<4>::new();
            let (mut tx, mut rx) = queue.split();

            tx.send(frame(1));
            drop(tx);

            assert_eq!(rx.receive().await.unwrap().as_bytes()[2], 1);
            assert!(rx.receive().await.is_none());
        }
        .block_on();
    }

    #[test]
    fn split_resets_state() {
        let mut queue = FrameQueue::<2>::new();
        {
            let (mut tx, _rx) = queue.split();
            tx.send(frame(0));
            tx.send(frame(1));
            assert_eq!(tx.dropped(), 1);
        }

        let (tx, mut rx) = queue.split();
        assert_eq!(tx.dropped(), 0);
        assert_eq!(rx.try_receive().unwrap().as_bytes()[2], 0);
    }

    #[test]
    fn producer_thread() {
        let mut queue = FrameQueue::<3>::new();
        let (mut tx, mut rx) = queue.split();

        std::thread::scope(|s| {
            s.spawn(move || {
                let mut sent = 0u8;
                while sent < 100 {
                    if tx.send(frame(sent)) {
                        sent += 1;
                    } else {
                        std::thread::yield_now();
                    }
                }
            });

            async {
                let mut expected = 0u8;
                while let Some(frame) = rx.receive().await {
                    assert_eq!(frame.as_bytes()[2], expected);
                    expected += 1;
                }
                assert_eq!(expected, 100);
            }
            .block_on();
        });
    }
}
