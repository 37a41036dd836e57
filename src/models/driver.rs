//! Modelo de Driver
//!
//! Mapea a la tabla `driver`. El campo `car_id` es una referencia débil
//! hacia `car` (el Driver no es dueño del Car).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de conexión del driver - mapea al ENUM online_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "online_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OnlineStatus {
    Online,
    Offline,
}

/// Registro de driver tal como vive en la base de datos.
/// `password` nunca debe salir en una respuesta de la API.
#[derive(Debug, Clone, FromRow)]
pub struct DriverRecord {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub date_created: DateTime<Utc>,
    pub deleted: bool,
    pub password_expired: bool,
    pub online_status: OnlineStatus,
    pub car_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&OnlineStatus::Online).unwrap(),
            "\"ONLINE\""
        );
        let parsed: OnlineStatus = serde_json::from_str("\"OFFLINE\"").unwrap();
        assert_eq!(parsed, OnlineStatus::Offline);
    }
}
