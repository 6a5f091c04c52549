//! FASTA 读取。
//!
//! 两种取用方式：
//! - [`FastaReader`]：常规逐记录解析，剥掉空白，序列跨行拼接；
//! - [`read_raw_sequence`]：只去掉首条记录的头行，保留换行符等原始
//!   噪声——距离引擎的跳过规则正是为这种未清洗的字符流设计的。

use anyhow::{anyhow, bail, Result};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // 找到头行
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if self.buf.starts_with('>') {
                    let h = self.buf[1..].trim().to_string();
                    break h;
                }
            }
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // 读序列行；大小写保留，分类器本身大小写不敏感
        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if self.buf.starts_with('>') {
                let h = self.buf[1..].trim().to_string();
                self.peek_header = Some(h);
                break;
            }
            for &b in self.buf.as_bytes() {
                match b {
                    b'\n' | b'\r' | b' ' | b'\t' => {}
                    _ => seq.push(b),
                }
            }
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 读取文件首条记录的清洗后序列；没有任何记录则报错。
pub fn read_first_sequence(path: &Path) -> Result<Vec<u8>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open FASTA '{}': {}", path.display(), e))?;
    let mut reader = FastaReader::new(std::io::BufReader::new(fh));
    match reader.next_record()? {
        Some(rec) => Ok(rec.seq),
        None => bail!("FASTA file '{}' contains no sequences", path.display()),
    }
}

/// 读取文件首条记录的原始字节流：去掉头行本身，但保留序列区域内的
/// 换行等非碱基符号，直到下一条记录或文件结束。
pub fn read_raw_sequence(path: &Path) -> Result<Vec<u8>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open FASTA '{}': {}", path.display(), e))?;
    let reader = std::io::BufReader::new(fh);

    let mut raw: Vec<u8> = Vec::new();
    let mut in_record = false;
    for line in reader.split(b'\n') {
        let line = line?;
        if line.first() == Some(&b'>') {
            if in_record {
                break;
            }
            in_record = true;
            continue;
        }
        if !in_record {
            // 头行之前的内容不属于任何记录
            continue;
        }
        raw.extend_from_slice(&line);
        raw.push(b'\n');
    }
    if !in_record {
        bail!("FASTA file '{}' contains no sequences", path.display());
    }
    Ok(raw)
}
