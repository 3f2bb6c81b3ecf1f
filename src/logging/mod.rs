use std::{
    fmt::Write as _,
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use chrono::Local;
use crossbeam_channel::{bounded, unbounded, Sender};
use once_cell::sync::Lazy;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("board"));

/// 累積到此長度或佇列清空時才寫入檔案
const FLUSH_THRESHOLD: usize = 2048;

/// 等待寫檔線程回應 flush 的上限
const FLUSH_WAIT: Duration = Duration::from_secs(1);

enum Message {
    Line(String),
    /// 寫出尚未落地的內容後回覆
    Flush(Sender<()>),
}

#[derive(Debug, Copy, Clone)]
enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn name(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Debug => "debug",
        }
    }
}

/// 每個等級各自一個寫檔線程，呼叫端只負責把訊息丟進 channel
pub struct Logger {
    info_writer: Option<Sender<Message>>,
    warn_writer: Option<Sender<Message>>,
    error_writer: Option<Sender<Message>>,
    debug_writer: Option<Sender<Message>>,
}

impl Logger {
    fn new(log_name: &str) -> Self {
        Logger {
            info_writer: Self::create_writer(log_name, Level::Info),
            warn_writer: Self::create_writer(log_name, Level::Warn),
            error_writer: Self::create_writer(log_name, Level::Error),
            debug_writer: Self::create_writer(log_name, Level::Debug),
        }
    }

    fn write(&self, level: Level, msg: String) {
        let writer = match level {
            Level::Info => &self.info_writer,
            Level::Warn => &self.warn_writer,
            Level::Error => &self.error_writer,
            Level::Debug => &self.debug_writer,
        };

        match writer {
            Some(tx) => {
                if let Err(why) = tx.send(Message::Line(msg)) {
                    error_console(why.to_string());
                }
            }
            // 無法建立 log 檔時退回 console
            None => match level {
                Level::Error => error_console(msg),
                _ => info_console(msg),
            },
        }
    }

    /// 要求每個寫檔線程把緩衝寫入檔案，並等待完成
    fn flush(&self) {
        let writers = [
            &self.info_writer,
            &self.warn_writer,
            &self.error_writer,
            &self.debug_writer,
        ];

        for tx in writers.into_iter().flatten() {
            let (done_tx, done_rx) = bounded::<()>(1);
            if tx.send(Message::Flush(done_tx)).is_ok() && done_rx.recv_timeout(FLUSH_WAIT).is_err() {
                error_console("Timed out waiting for log writer to flush.".to_string());
            }
        }
    }

    fn create_writer(log_name: &str, level: Level) -> Option<Sender<Message>> {
        let log_path = match Self::get_log_path(&format!("{}_{}", log_name, level.name())) {
            Some(p) => p,
            None => {
                error_console("Failed to create log directory.".to_string());
                return None;
            }
        };

        let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(f) => f,
            Err(why) => {
                error_console(format!(
                    "Failed to open log file {:?} because {:?}",
                    log_path, why
                ));
                return None;
            }
        };

        let (tx, rx) = unbounded::<Message>();

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut writer = BufWriter::new(file);
            let mut line = String::with_capacity(FLUSH_THRESHOLD);

            for received in &rx {
                let done = match received {
                    Message::Line(msg) => {
                        if writeln!(&mut line, "{} {}", Local::now().format("%F %X%.6f"), msg).is_err() {
                            continue;
                        }
                        None
                    }
                    Message::Flush(done) => Some(done),
                };

                if done.is_some() || rx.is_empty() || line.len() >= FLUSH_THRESHOLD {
                    Self::write_out(&mut writer, &mut line);
                }

                if let Some(done) = done {
                    let _ = done.send(());
                }
            }
        });

        Some(tx)
    }

    fn write_out(writer: &mut BufWriter<fs::File>, line: &mut String) {
        if !line.is_empty() {
            if let Err(why) = writer.write_all(line.as_bytes()) {
                error_console(format!(
                    "Failed to write to log file. because:{:#?}\r\nmsg:{}",
                    why, line
                ));
            }
            line.clear();
        }

        if let Err(why) = writer.flush() {
            error_console(format!("Failed to flush log file. because:{:#?}", why));
        }
    }

    fn get_log_path(name: &str) -> Option<PathBuf> {
        let path = Path::new("log");

        if !path.exists() {
            fs::create_dir_all(path).ok()?;
        }

        let mut log_path = PathBuf::from(path);
        log_path.push(format!("{}_{}.log", Local::now().format("%Y-%m-%d"), name));

        Some(log_path)
    }
}

pub fn info_file_async(log: String) {
    LOGGER.write(Level::Info, log);
}

pub fn warn_file_async(log: String) {
    LOGGER.write(Level::Warn, log);
}

pub fn error_file_async(log: String) {
    LOGGER.write(Level::Error, log);
}

pub fn debug_file_async(log: String) {
    LOGGER.write(Level::Debug, log);
}

/// 程式結束前呼叫，確保佇列中的訊息都已寫入檔案
pub fn flush() {
    LOGGER.flush();
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    eprintln!(
        "{} Error {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}
