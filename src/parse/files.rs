use super::parser::parse_str;
use crate::{Element, Error, ErrorType};
use std::{
    collections::VecDeque,
    fs,
    sync::{Arc, Mutex, PoisonError},
    thread,
};

type Queue = Arc<Mutex<VecDeque<(usize, String)>>>;

/// Decodes the bytes of an OFX file. SGML OFX files are frequently in a
/// single-byte charset; anything that is not valid UTF-8 is read as Latin-1.
pub fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

pub fn read_file(path: &str) -> Result<String, Error> {
    let bytes = fs::read(path).map_err(|io_error| Error {
        msg: format!("Couldn't read {}: {}", path, io_error),
        r#type: ErrorType::Io,
    })?;
    Ok(decode(bytes))
}

pub fn parse_file(path: &str) -> Result<Element, Error> {
    let text = read_file(path)?;
    log::info!("parsing {} ({} bytes)", path, text.len());
    parse_str(&text).ok_or_else(|| Error {
        msg: format!("{} contains no OFX element.", path),
        r#type: ErrorType::Empty,
    })
}

fn worker(id: usize, queue: Queue) -> Vec<(usize, Result<Element, Error>)> {
    let mut done = vec![];
    loop {
        let task = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let (index, path) = match task {
            Some(task) => task,
            None => return done,
        };
        log::debug!("worker {} takes {}", id, path);
        done.push((index, parse_file(&path)));
    }
}

/// Parses several files on a pool of threads. The pool size is read from
/// `OFX_PARSER_THREADS` and defaults to the number of CPUs. Results are in
/// the order of `paths`.
pub fn parse_files(paths: &[String]) -> Vec<Result<Element, Error>> {
    if paths.is_empty() {
        return vec![];
    }
    let num_threads = std::env::var("OFX_PARSER_THREADS")
        .ok()
        .and_then(|num| num.parse::<usize>().ok())
        .unwrap_or_else(num_cpus::get)
        .clamp(1, paths.len());
    let queue: Queue = Arc::new(Mutex::new(paths.iter().cloned().enumerate().collect()));
    let handlers = (0..num_threads)
        .map(|id| {
            let queue = queue.clone();
            thread::spawn(move || worker(id, queue))
        })
        .collect::<Vec<_>>();

    let mut results: Vec<Option<Result<Element, Error>>> = paths.iter().map(|_| None).collect();
    for handler in handlers {
        match handler.join() {
            Ok(done) => {
                for (index, result) in done {
                    if let Some(slot) = results.get_mut(index) {
                        *slot = Some(result);
                    }
                }
            }
            Err(_) => log::error!("a parser thread panicked"),
        }
    }
    results
        .into_iter()
        .zip(paths)
        .map(|(result, path)| {
            result.unwrap_or_else(|| {
                Err(Error {
                    msg: format!("{} was not parsed.", path),
                    r#type: ErrorType::Io,
                })
            })
        })
        .collect()
}
