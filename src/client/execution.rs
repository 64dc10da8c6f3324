//! Request execution: one send per call, buffered or streamed.

use super::core::MistralClient;
use super::types::ApiResponse;
use crate::pipeline::{self, StreamSummary};
use crate::transport::{PreparedRequest, TransportResponse};
use crate::{BoxStream, CallbackError, Error, Result};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

impl MistralClient {
    /// Send `request` and fail fast on transport errors and status >= 400.
    async fn open(&self, operation: &str, request: PreparedRequest) -> Result<TransportResponse> {
        let multipart = request
            .header("content-type")
            .map(|ct| ct.starts_with("multipart/"))
            .unwrap_or(false);
        debug!(
            operation,
            method = %request.method,
            url = %request.url,
            multipart,
            "sending mistral request"
        );

        let start = Instant::now();
        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                info!(
                    operation,
                    duration_ms = start.elapsed().as_millis(),
                    error = %e,
                    "mistral transport failure"
                );
                return Err(Error::from(e));
            }
        };

        if resp.status >= 400 {
            let status = resp.status;
            let body = match collect(resp.body).await {
                Ok(body) => String::from_utf8_lossy(&body).into_owned(),
                Err(e) => {
                    debug!(operation, http_status = status, error = %e, "failed to read error body");
                    format!("HTTP {} (error body unreadable: {})", status, e)
                }
            };
            info!(
                operation,
                http_status = status,
                duration_ms = start.elapsed().as_millis(),
                "mistral request failed"
            );
            return Err(Error::api(status, body));
        }

        debug!(
            operation,
            http_status = resp.status,
            duration_ms = start.elapsed().as_millis(),
            "mistral response headers received"
        );
        Ok(resp)
    }

    pub(crate) async fn send_buffered(
        &self,
        operation: &str,
        request: PreparedRequest,
    ) -> Result<ApiResponse> {
        let start = Instant::now();
        let resp = self.open(operation, request).await?;
        let status = resp.status;
        let headers = resp.headers;
        let body = collect(resp.body).await?;

        info!(
            operation,
            http_status = status,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis(),
            "mistral request completed"
        );
        Ok(ApiResponse::new(status, headers, body))
    }

    pub(crate) async fn send_streaming<F>(
        &self,
        operation: &str,
        request: PreparedRequest,
        on_frame: &mut F,
    ) -> Result<StreamSummary>
    where
        F: FnMut(Value) -> std::result::Result<(), CallbackError> + ?Sized,
    {
        let start = Instant::now();
        let resp = self.open(operation, request).await?;
        let summary = pipeline::drive(resp.body, on_frame).await?;

        info!(
            operation,
            frames = summary.frames,
            sentinel = summary.terminated_by_sentinel,
            duration_ms = start.elapsed().as_millis(),
            "mistral stream completed"
        );
        Ok(summary)
    }

    pub(crate) async fn open_frames(
        &self,
        operation: &str,
        request: PreparedRequest,
    ) -> Result<BoxStream<'static, Value>> {
        let resp = self.open(operation, request).await?;
        Ok(pipeline::frame_stream(resp.body))
    }
}

async fn collect(mut body: BoxStream<'static, Bytes>) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf.freeze())
}
