//! Test fixtures: canned archives and a single-shot HTTP stub.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use tar::{Builder, EntryType, Header};

/// Entries fed to [`archive`].
pub enum ArchiveEntry<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8]),
    Symlink(&'a str, &'a str),
}

/// Serialize entries into a gzip-compressed tar stream.
pub fn archive(entries: &[ArchiveEntry<'_>]) -> Vec<u8> {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for entry in entries {
        match entry {
            ArchiveEntry::Dir(name) => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Directory);
                header.set_mode(0o755);
                header.set_size(0);
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap();
            }
            ArchiveEntry::File(name, bytes) => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Regular);
                header.set_mode(0o755);
                header.set_size(bytes.len() as u64);
                builder.append_data(&mut header, name, *bytes).unwrap();
            }
            ArchiveEntry::Symlink(name, target) => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Symlink);
                header.set_mode(0o777);
                header.set_size(0);
                header.set_link_name(target).unwrap();
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// A stub update server that answers each expected connection with one
/// canned response and records the request lines it saw.
pub struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

/// Assemble a minimal HTTP/1.1 response. `Connection: close` keeps the
/// client from pooling the socket, so every request shows up as its own
/// connection.
pub fn http_response(status_line: &str, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Serve exactly one connection per canned response, in order.
pub fn serve(responses: Vec<Vec<u8>>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            requests.push(read_request_line(&mut stream));
            stream.write_all(&response).unwrap();
        }
        requests
    });

    StubServer { addr, handle }
}

impl StubServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Wait for all canned responses to be consumed and return the
    /// request lines, e.g. `GET /latest HTTP/1.1`.
    pub fn finish(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

fn read_request_line(stream: &mut TcpStream) -> String {
    // Consume the head; only the request line matters to the tests.
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => break,
            Ok(_) => head.push(byte[0]),
        }
    }
    String::from_utf8_lossy(&head)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
