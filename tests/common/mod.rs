#![allow(dead_code)]

use async_trait::async_trait;
use foodiepal::domain::{Coordinate, FoodiePalError, LocationFix, Region, Restaurant, Result};
use foodiepal::location::{LocationProvider, PermissionStatus};
use foodiepal::places::PlacesSearch;
use foodiepal::render::{CardView, ListRenderer, MapRenderer, MapView, ScrollError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn restaurant(id: &str, latitude: f64, longitude: f64) -> Restaurant {
    Restaurant::new(id, format!("Restaurant {id}"), latitude, longitude, None)
}

/// Location provider with a canned answer and call counters.
pub struct ScriptedLocation {
    pub permission: PermissionStatus,
    pub position: Option<(f64, f64)>,
    pub fix_delay: Duration,
    pub permission_calls: AtomicUsize,
    pub fix_calls: AtomicUsize,
}

impl ScriptedLocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some((latitude, longitude)),
            fix_delay: Duration::from_millis(10),
            permission_calls: AtomicUsize::new(0),
            fix_calls: AtomicUsize::new(0),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: None,
            ..Self::at(0.0, 0.0)
        }
    }

    pub fn unavailable() -> Self {
        Self {
            position: None,
            ..Self::at(0.0, 0.0)
        }
    }

    pub fn slow(mut self, fix_delay: Duration) -> Self {
        self.fix_delay = fix_delay;
        self
    }

    pub fn permission_calls(&self) -> usize {
        self.permission_calls.load(Ordering::SeqCst)
    }

    pub fn fix_calls(&self) -> usize {
        self.fix_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.permission
    }

    async fn current_position(&self) -> Result<LocationFix> {
        self.fix_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.fix_delay).await;
        self.position
            .map(|(lat, lon)| LocationFix::now(lat, lon))
            .ok_or_else(|| FoodiePalError::Location("unavailable".into()))
    }
}

/// Places search answering from a queue, one entry per call.
///
/// When the queue runs dry every further call returns an empty set.
pub struct ScriptedPlaces {
    answers: Mutex<VecDeque<std::result::Result<Vec<Restaurant>, String>>>,
    pub delay: Duration,
    pub calls: Mutex<Vec<Coordinate>>,
}

impl ScriptedPlaces {
    pub fn new(answers: Vec<std::result::Result<Vec<Restaurant>, String>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            delay: Duration::from_millis(50),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(restaurants: Vec<Restaurant>) -> Self {
        Self::new(vec![Ok(restaurants)])
    }

    pub fn calls(&self) -> Vec<Coordinate> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesSearch for ScriptedPlaces {
    async fn search_nearby(&self, at: Coordinate) -> Result<Vec<Restaurant>> {
        let answer = {
            self.calls.lock().unwrap().push(at);
            self.answers.lock().unwrap().pop_front()
        };
        tokio::time::sleep(self.delay).await;
        match answer {
            Some(Ok(restaurants)) => Ok(restaurants),
            Some(Err(reason)) => Err(FoodiePalError::Search(reason)),
            None => Ok(vec![]),
        }
    }
}

/// Map renderer recording every command.
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub updates: Vec<MapView>,
    pub animations: Vec<(Region, Duration)>,
    pub callouts: Vec<String>,
}

impl RecordingMap {
    pub fn last(&self) -> Option<&MapView> {
        self.updates.last()
    }
}

impl MapRenderer for RecordingMap {
    fn update(&mut self, view: &MapView) {
        self.updates.push(view.clone());
    }

    fn animate_to_region(&mut self, region: Region, duration: Duration) {
        self.animations.push((region, duration));
    }

    fn show_callout(&mut self, restaurant_id: &str) {
        self.callouts.push(restaurant_id.to_string());
    }
}

/// List renderer that refuses the first `failures` scrolls.
#[derive(Debug, Default)]
pub struct RecordingList {
    pub cards: Vec<CardView>,
    pub scroll_attempts: Vec<(usize, f32)>,
    pub scrolled_to: Option<usize>,
    pub failures: usize,
}

impl RecordingList {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }
}

impl ListRenderer for RecordingList {
    fn update(&mut self, cards: &[CardView]) {
        self.cards = cards.to_vec();
    }

    fn scroll_to_index(&mut self, index: usize, view_position: f32) -> std::result::Result<(), ScrollError> {
        self.scroll_attempts.push((index, view_position));
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ScrollError::NotLaidOut {
                index,
                laid_out: 0,
            });
        }
        self.scrolled_to = Some(index);
        Ok(())
    }
}

/// Serves one canned HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the raw request head.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        let head_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "client closed before sending a request");
            request.extend_from_slice(&buf[..n]);
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&request[..head_end]).into_owned();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while request.len() < head_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}"), handle)
}
