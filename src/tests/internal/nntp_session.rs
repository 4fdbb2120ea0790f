use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::article::{ArticleFetcher, FetchError, NntpConfig, NntpSession};
use crate::codec::{SegmentDecoder, YencDecoder};
use crate::tests::{encode_yenc, load_account_optional, random_payload};

/// 启动一个只处理一条连接的 NNTP 服务器，按 message-id（不含尖括号）返回文章。
async fn spawn_fake_server(articles: HashMap<String, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        writer.write_all(b"200 fake server ready\r\n").await.unwrap();

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let command = line.trim_end();

            if command == "QUIT" {
                writer.write_all(b"205 bye\r\n").await.unwrap();
                break;
            }

            let Some(id) = command.strip_prefix("BODY ") else {
                writer.write_all(b"500 unknown command\r\n").await.unwrap();
                continue;
            };
            let key = id.trim_start_matches('<').trim_end_matches('>');

            match articles.get(key) {
                Some(body) => {
                    writer
                        .write_all(format!("222 0 {id} body follows\r\n").as_bytes())
                        .await
                        .unwrap();
                    for body_line in body.split_inclusive(|&b| b == b'\n') {
                        if body_line.starts_with(b".") {
                            writer.write_all(b".").await.unwrap();
                        }
                        writer.write_all(body_line).await.unwrap();
                    }
                    writer.write_all(b".\r\n").await.unwrap();
                }
                None => {
                    writer.write_all(b"430 no such article\r\n").await.unwrap();
                }
            }
        }
    });

    address
}

#[test]
fn config_defaults_and_validation() {
    let config = NntpConfig::new("news.example.com").unwrap();
    assert_eq!(config.server.scheme(), "nntp");
    assert_eq!(config.port(), 119);
    assert_eq!(config.address(), "news.example.com:119");
    assert_eq!(config.timeout_ms, 30_000);

    let config = NntpConfig::new("nntp://127.0.0.1:1119").unwrap().with_timeout_ms(500);
    assert_eq!(config.address(), "127.0.0.1:1119");
    assert_eq!(config.timeout().as_millis(), 500);

    assert!(matches!(NntpConfig::new("https://example.com"), Err(FetchError::UnsupportedScheme(_))));
    assert!(matches!(NntpConfig::new("  "), Err(FetchError::InvalidUrl(_))));
}

#[tokio::test]
async fn body_is_dot_unstuffed() {
    let body = b"first line\r\n.starts with dot\r\n..two dots\r\nlast\r\n".to_vec();
    let address = spawn_fake_server(HashMap::from([("a@b".to_string(), body.clone())])).await;

    let session = NntpSession::connect(NntpConfig::new(&address).unwrap()).await.unwrap();
    let fetched = session.fetch_article("a@b").await.unwrap();
    assert_eq!(&fetched[..], &body[..]);

    // 带尖括号的 id 同样可用
    let fetched = session.body("<a@b>").await.unwrap();
    assert_eq!(&fetched[..], &body[..]);

    session.quit().await.unwrap();
}

#[tokio::test]
async fn missing_article_maps_to_not_found_and_session_survives() {
    let address =
        spawn_fake_server(HashMap::from([("ok@test".to_string(), b"hello\r\n".to_vec())])).await;
    let session = NntpSession::connect(NntpConfig::new(&address).unwrap()).await.unwrap();

    let err = session.fetch_article("missing@test").await.unwrap_err();
    assert!(matches!(err, FetchError::ArticleNotFound(ref id) if id == "<missing@test>"), "{err}");

    let fetched = session.fetch_article("ok@test").await.unwrap();
    assert_eq!(&fetched[..], b"hello\r\n");
}

#[tokio::test]
async fn yenc_article_round_trips_through_session() {
    let data = random_payload(3000, 9);
    let article = encode_yenc("data.bin", &data, Some((1, 0)), 9000);
    let address = spawn_fake_server(HashMap::from([("p1@test".to_string(), article)])).await;

    let session = NntpSession::connect(NntpConfig::new(&address).unwrap()).await.unwrap();
    let raw = session.fetch_article("p1@test").await.unwrap();
    let decoded = YencDecoder::new().decode(&raw).unwrap();

    assert_eq!(&decoded.payload[..], &data[..]);
    let metadata = decoded.metadata.unwrap();
    assert_eq!(metadata.total_size, 9000);
    assert_eq!(metadata.segment_size, 3000);
}

#[tokio::test]
async fn closed_connection_breaks_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.write_all(b"201 no posting\r\n").await.unwrap();
        // 读到命令后直接断开
        let mut buf = [0u8; 64];
        let _ = tokio::io::AsyncReadExt::read(&mut stream, &mut buf).await;
    });

    let session = NntpSession::connect(NntpConfig::new(&address).unwrap()).await.unwrap();
    assert!(session.fetch_article("x@y").await.is_err());
    assert!(matches!(session.fetch_article("x@y").await, Err(FetchError::ConnectionClosed)));
}

#[tokio::test]
async fn live_server_body() {
    let Some(account) = load_account_optional() else {
        return;
    };

    let session = match NntpSession::connect(NntpConfig::new(&account.url).unwrap()).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("连接失败（可检查 env）：{}", e);
            return;
        }
    };
    let raw = session.fetch_article(&account.message_id).await.unwrap();
    println!("文章字节数: {}", raw.len());
    assert!(!raw.is_empty());
}
