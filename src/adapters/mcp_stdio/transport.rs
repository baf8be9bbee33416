use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};

use crate::adapters::mcp_stdio::rpc::RpcEnvelope;

/// Wire framing detected from the first byte of an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TransportMode {
    /// LSP-style `Content-Length` headers followed by a raw body.
    Framed,
    /// One JSON document per line.
    JsonLine,
}

fn content_length(headers: &[String], max_frame_bytes: usize) -> anyhow::Result<usize> {
    let mut length = None;
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("invalid frame header '{}'", header))?;
        if !name.trim().eq_ignore_ascii_case("content-length") {
            continue;
        }
        let parsed = value
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("invalid Content-Length value"))?;
        if parsed > max_frame_bytes {
            anyhow::bail!("frame too large: {} bytes (max {})", parsed, max_frame_bytes);
        }
        length = Some(parsed);
    }
    length.ok_or_else(|| anyhow::anyhow!("missing Content-Length header"))
}

/// Read one line (up to and including `\n`), refusing lines over `max_bytes`.
async fn read_bounded_line<R>(
    reader: &mut BufReader<R>,
    prefix: Option<u8>,
    max_bytes: usize,
) -> anyhow::Result<String>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut buf: Vec<u8> = prefix.into_iter().collect();
    let mut limited = (&mut *reader).take(max_bytes as u64 + 1);
    limited.read_until(b'\n', &mut buf).await?;
    let line = String::from_utf8_lossy(&buf).into_owned();
    if line.trim_end_matches(['\r', '\n']).len() > max_bytes {
        anyhow::bail!("incoming frame too large (max {} bytes)", max_bytes);
    }
    Ok(line)
}

async fn first_significant_byte<R>(reader: &mut BufReader<R>) -> anyhow::Result<Option<u8>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    loop {
        let mut one = [0u8; 1];
        if reader.read(&mut one).await? == 0 {
            return Ok(None);
        }
        if !one[0].is_ascii_whitespace() {
            return Ok(Some(one[0]));
        }
    }
}

/// Read the next message, returning `None` on EOF.
pub(super) async fn read_next_message<R>(
    reader: &mut BufReader<R>,
    max_frame_bytes: usize,
) -> anyhow::Result<Option<(String, TransportMode)>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(first) = first_significant_byte(reader).await? else {
        return Ok(None);
    };

    if first == b'{' || first == b'[' {
        let line = read_bounded_line(reader, Some(first), max_frame_bytes).await?;
        let message = line.trim_end_matches(['\r', '\n']).to_string();
        serde_json::from_str::<serde_json::Value>(&message)
            .map_err(|e| anyhow::anyhow!("invalid JSON message: {}", e))?;
        return Ok(Some((message, TransportMode::JsonLine)));
    }

    let mut headers = Vec::new();
    let mut line = read_bounded_line(reader, Some(first), max_frame_bytes).await?;
    loop {
        if line.is_empty() {
            anyhow::bail!("unexpected EOF while reading frame headers");
        }
        let header = line.trim_end_matches(['\r', '\n']);
        if header.trim().is_empty() {
            break;
        }
        headers.push(header.to_string());
        line = read_bounded_line(reader, None, max_frame_bytes).await?;
    }

    let length = content_length(&headers, max_frame_bytes)?;
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;
    Ok(Some((
        String::from_utf8_lossy(&body).into_owned(),
        TransportMode::Framed,
    )))
}

pub(super) async fn write_response<W: tokio::io::AsyncWrite + Unpin>(
    writer: &mut BufWriter<W>,
    envelope: &RpcEnvelope,
    mode: TransportMode,
) -> anyhow::Result<()> {
    let body = serde_json::to_vec(envelope)?;
    if mode == TransportMode::Framed {
        let header = format!("Content-Length: {}\r\n\r\n", body.len());
        writer.write_all(header.as_bytes()).await?;
        writer.write_all(&body).await?;
    } else {
        writer.write_all(&body).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const MAX: usize = 1024 * 1024;

    async fn parse_msg(input: &[u8]) -> anyhow::Result<Option<(String, TransportMode)>> {
        let mut reader = BufReader::new(input);
        read_next_message(&mut reader, MAX).await
    }

    #[tokio::test]
    async fn test_json_line_with_and_without_newline() {
        for input in [&b"{\"jsonrpc\":\"2.0\"}\n"[..], &b"{\"jsonrpc\":\"2.0\"}"[..]] {
            let (msg, mode) = parse_msg(input).await.unwrap().unwrap();
            let parsed: Value = serde_json::from_str(&msg).unwrap();
            assert_eq!(parsed["jsonrpc"], "2.0");
            assert_eq!(mode, TransportMode::JsonLine);
        }
    }

    #[tokio::test]
    async fn test_multiline_json_is_rejected() {
        let err = parse_msg(b"{\n\"method\":\"ping\"\n}\n").await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON message"), "{}", err);
    }

    #[tokio::test]
    async fn test_json_lines_are_read_sequentially() {
        let input = b"{\"id\":1}\n{\"id\":2}\n";
        let mut reader = BufReader::new(&input[..]);
        let (first, _) = read_next_message(&mut reader, MAX).await.unwrap().unwrap();
        let (second, _) = read_next_message(&mut reader, MAX).await.unwrap().unwrap();
        assert_eq!(first, "{\"id\":1}");
        assert_eq!(second, "{\"id\":2}");
        assert!(read_next_message(&mut reader, MAX).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_content_length_framing_with_extra_headers() {
        let body = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}";
        let frame = format!(
            "Content-Type: application/vscode-jsonrpc; charset=utf-8\r\ncontent-length: {}\r\n\r\n",
            body.len()
        );
        let mut input = frame.into_bytes();
        input.extend_from_slice(body);
        let (msg, mode) = parse_msg(&input).await.unwrap().unwrap();
        assert!(msg.contains("tools/list"));
        assert_eq!(mode, TransportMode::Framed);
    }

    #[tokio::test]
    async fn test_oversized_frames_are_rejected() {
        let frame = format!("Content-Length: {}\r\n\r\n", MAX + 1);
        assert!(parse_msg(frame.as_bytes()).await.is_err());

        let tiny = 16;
        let long_line = format!("{{\"k\":\"{}\"}}\n", "v".repeat(tiny));
        let mut reader = BufReader::new(long_line.as_bytes());
        assert!(read_next_message(&mut reader, tiny).await.is_err());

        let long_header = format!("X-Huge: {}\n", "A".repeat(tiny + 1));
        let mut reader = BufReader::new(long_header.as_bytes());
        let err = read_next_message(&mut reader, tiny).await.unwrap_err();
        assert!(err.to_string().contains("too large"), "{}", err);
    }

    #[tokio::test]
    async fn test_missing_content_length_is_rejected() {
        let err = parse_msg(b"X-Other: 1\r\n\r\n{}").await.unwrap_err();
        assert!(err.to_string().contains("missing Content-Length"), "{}", err);
    }

    #[tokio::test]
    async fn test_write_response_matches_mode() {
        let envelope = RpcEnvelope::success(Value::from(1), serde_json::json!({}));

        let mut framed = BufWriter::new(Vec::new());
        write_response(&mut framed, &envelope, TransportMode::Framed)
            .await
            .unwrap();
        let framed = String::from_utf8(framed.into_inner()).unwrap();
        assert!(framed.starts_with("Content-Length: "));

        let mut lines = BufWriter::new(Vec::new());
        write_response(&mut lines, &envelope, TransportMode::JsonLine)
            .await
            .unwrap();
        let lines = String::from_utf8(lines.into_inner()).unwrap();
        assert!(lines.ends_with("}\n"));
    }
}
