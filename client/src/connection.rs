//! TCP connection lifecycle and the receive/send workers.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, error};
use wire::{Compression, FrameBuffer, Limits};

use crate::error::{ClientError, ClientResult};

/// How long blocking socket reads wait before re-checking the stop flag.
const READ_TIMEOUT: Duration = Duration::from_millis(250);

/// How long the send worker waits for queue entries between stop checks.
const SEND_POLL: Duration = Duration::from_millis(100);

/// One queued outgoing message: final wire bytes plus an optional
/// completion callback.
///
/// The callback runs on the send worker after the bytes are handed to the
/// socket and before the next entry is dequeued; it must not block.
pub struct SendEntry {
    pub bytes: Vec<u8>,
    pub on_sent: Option<Box<dyn FnOnce() + Send>>,
}

/// A cloneable handle for queueing sends and raising the stop flag from
/// handlers without borrowing the [`Connection`] itself.
#[derive(Clone)]
pub struct ConnectionHandle {
    sender: Sender<SendEntry>,
    stop: Arc<AtomicBool>,
}

impl ConnectionHandle {
    /// Queues wire bytes for delivery, as [`Connection::send`] does.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionClosed`] once the connection has
    /// stopped.
    pub fn send(
        &self,
        bytes: Vec<u8>,
        on_sent: Option<Box<dyn FnOnce() + Send>>,
    ) -> ClientResult<()> {
        if self.stop.load(Ordering::SeqCst) {
            return Err(ClientError::ConnectionClosed);
        }
        self.sender
            .send(SendEntry { bytes, on_sent })
            .map_err(|_| ClientError::ConnectionClosed)
    }

    /// Raises the stop flag; both workers unwind on their next check.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// A live TCP connection with its two workers.
///
/// The receive worker reads chunks, re-frames them through a
/// [`FrameBuffer`], and hands complete packet payloads to the dispatcher
/// callback. The send worker drains the FIFO queue fed by
/// [`send`](Self::send). Both stop when the shared flag is raised by
/// either worker, a handler, or [`shutdown`](Self::shutdown).
pub struct Connection {
    sender: Option<Sender<SendEntry>>,
    stop: Arc<AtomicBool>,
    stream: TcpStream,
    recv_worker: Option<JoinHandle<()>>,
    send_worker: Option<JoinHandle<()>>,
}

impl Connection {
    /// Starts the workers over a connected stream.
    ///
    /// `on_payload` runs on the receive worker for every complete frame's
    /// packet payload. `compression` is re-read for every frame, so a
    /// handler enabling compression affects the very next frame.
    pub fn start(
        stream: TcpStream,
        compression: Arc<Mutex<Compression>>,
        limits: Limits,
        stop: Arc<AtomicBool>,
        on_payload: impl FnMut(Vec<u8>) + Send + 'static,
    ) -> ClientResult<Self> {
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        let reader = stream.try_clone()?;
        let writer = stream.try_clone()?;
        let (sender, receiver) = unbounded::<SendEntry>();

        let recv_stop = stop.clone();
        let recv_worker = thread::Builder::new()
            .name("mcproto-recv".into())
            .spawn(move || {
                recv_loop(reader, &compression, &limits, &recv_stop, on_payload);
                recv_stop.store(true, Ordering::SeqCst);
            })?;

        let send_stop = stop.clone();
        let send_worker = thread::Builder::new()
            .name("mcproto-send".into())
            .spawn(move || {
                send_loop(writer, &receiver, &send_stop);
                send_stop.store(true, Ordering::SeqCst);
            })?;

        Ok(Self {
            sender: Some(sender),
            stop,
            stream,
            recv_worker: Some(recv_worker),
            send_worker: Some(send_worker),
        })
    }

    /// Queues wire bytes for delivery, with an optional completion.
    ///
    /// Entries from one thread reach the socket in `send` order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionClosed`] once the connection has
    /// stopped.
    pub fn send(
        &self,
        bytes: Vec<u8>,
        on_sent: Option<Box<dyn FnOnce() + Send>>,
    ) -> ClientResult<()> {
        if self.stop.load(Ordering::SeqCst) {
            return Err(ClientError::ConnectionClosed);
        }
        self.sender
            .as_ref()
            .ok_or(ClientError::ConnectionClosed)?
            .send(SendEntry { bytes, on_sent })
            .map_err(|_| ClientError::ConnectionClosed)
    }

    /// Returns a cloneable handle for use inside packet handlers.
    ///
    /// # Panics
    ///
    /// Panics if called after [`shutdown`](Self::shutdown).
    #[must_use]
    pub fn handle(&self) -> ConnectionHandle {
        ConnectionHandle {
            sender: self.sender.clone().expect("connection already shut down"),
            stop: self.stop.clone(),
        }
    }

    /// Returns `true` once either worker has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Blocks until both workers have exited, then releases the socket.
    ///
    /// Returns when the server closes the connection, a worker hits a
    /// fatal error, or [`shutdown`](Self::shutdown) is called from another
    /// thread.
    pub fn join(mut self) {
        if let Some(worker) = self.recv_worker.take() {
            let _ = worker.join();
        }
        self.sender.take();
        if let Some(worker) = self.send_worker.take() {
            let _ = worker.join();
        }
        let _ = self.stream.shutdown(Shutdown::Both);
    }

    /// Stops both workers and closes the socket.
    ///
    /// Queued sends are flushed before the socket closes. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.sender.take();
        // The send worker drains the queue when it observes the flag, so
        // join it before cutting the socket.
        if let Some(worker) = self.send_worker.take() {
            let _ = worker.join();
        }
        let _ = self.stream.shutdown(Shutdown::Both);
        if let Some(worker) = self.recv_worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn recv_loop(
    mut stream: TcpStream,
    compression: &Mutex<Compression>,
    limits: &Limits,
    stop: &AtomicBool,
    mut on_payload: impl FnMut(Vec<u8>),
) {
    let mut frames = FrameBuffer::new();
    let mut chunk = [0u8; 1024];

    while !stop.load(Ordering::SeqCst) {
        let read = match stream.read(&mut chunk) {
            Ok(0) => {
                debug!("server closed the connection");
                return;
            }
            Ok(read) => read,
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                continue;
            }
            Err(err) => {
                if !stop.load(Ordering::SeqCst) {
                    error!(%err, "receive failed");
                }
                return;
            }
        };

        frames.push(&chunk[..read]);
        loop {
            let mode = *compression.lock().unwrap();
            match frames.next_frame(mode, limits) {
                Ok(Some(payload)) => on_payload(payload),
                Ok(None) => break,
                Err(err) => {
                    error!(%err, "unrecoverable frame error");
                    return;
                }
            }
        }
    }
}

fn send_loop(mut stream: TcpStream, receiver: &Receiver<SendEntry>, stop: &AtomicBool) {
    loop {
        match receiver.recv_timeout(SEND_POLL) {
            Ok(entry) => {
                if !write_entry(&mut stream, entry, stop) {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if stop.load(Ordering::SeqCst) {
                    // Flush whatever was queued before the flag went up.
                    while let Ok(entry) = receiver.try_recv() {
                        if !write_entry(&mut stream, entry, stop) {
                            return;
                        }
                    }
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

fn write_entry(stream: &mut TcpStream, entry: SendEntry, stop: &AtomicBool) -> bool {
    if let Err(err) = stream.write_all(&entry.bytes) {
        if !stop.load(Ordering::SeqCst) {
            error!(%err, "send failed");
        }
        return false;
    }
    debug!(bytes = entry.bytes.len(), "C -> S frame delivered");
    if let Some(on_sent) = entry.on_sent {
        on_sent();
    }
    true
}
