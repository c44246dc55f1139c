//! Shared helpers for integration tests

#![allow(dead_code)]

use axum::Router;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::net::SocketAddr;

/// Serve `app` on an ephemeral local port for the rest of the test
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// A small PNG; decoded weight is `width * height * 4` bytes
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([30, 60, 90, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}
