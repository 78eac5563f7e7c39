// Export service - CSV download of the full frame
use crate::application::dashboard_service::DashboardService;
use crate::application::error::DashboardError;
use crate::application::telemetry_repository::FrameRequest;
use crate::domain::frame::SensorFrame;
use crate::infrastructure::csv_codec::encode_csv;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct CsvExport {
    pub file_name: String,
    pub bytes: Bytes,
}

/// CSV documents are tied to the exact frame they were encoded from, so a
/// download always matches the frame behind the dashboard for that period.
/// A document is re-encoded only when the frame cache hands out a new frame.
pub struct ExportService {
    dashboard_service: Arc<DashboardService>,
    file_name: String,
    documents: Mutex<HashMap<FrameRequest, (Arc<SensorFrame>, Bytes)>>,
}

impl ExportService {
    pub fn new(dashboard_service: Arc<DashboardService>, file_name: String) -> Self {
        Self {
            dashboard_service,
            file_name,
            documents: Mutex::new(HashMap::new()),
        }
    }

    pub async fn export_csv(&self, days: Option<u32>) -> Result<CsvExport, DashboardError> {
        let days = self.dashboard_service.resolve_days(days)?;
        let request = self.dashboard_service.frame_request(days);
        let frame = self.dashboard_service.get_frame(days).await?;

        let mut documents = self.documents.lock().await;
        let bytes = match documents.get(&request) {
            Some((encoded_from, bytes)) if Arc::ptr_eq(encoded_from, &frame) => {
                tracing::debug!("Reusing CSV document for {:?}", request);
                bytes.clone()
            }
            _ => {
                let bytes = encode_csv(&frame)?;
                tracing::debug!("Encoded {} CSV bytes for {:?}", bytes.len(), request);
                documents.insert(request, (frame, bytes.clone()));
                bytes
            }
        };

        Ok(CsvExport {
            file_name: self.file_name.clone(),
            bytes,
        })
    }
}
