use crate::models::ExportReceipt;

pub const DEFAULT_EXPORT_FORMAT: &str = "csv";

/// Stub d'export : aucun fichier produit, le format n'est pas validé.
pub fn export_metrics(user_id: Option<String>, format: String) -> ExportReceipt {
    ExportReceipt {
        message: format!("Metrics data exported in {format} format"),
        user_id,
        format,
    }
}
