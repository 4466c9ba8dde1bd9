use super::player::PlayerId;
use super::session::SessionId;
use super::status::AttendanceStatus;
use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attendance {
    pub id: i64,
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub status: AttendanceStatus,
}

impl Attendance {
    pub fn new(session_id: SessionId, player_id: PlayerId, status: AttendanceStatus) -> Self {
        Self {
            id: 0,
            session_id,
            player_id,
            status,
        }
    }
}

/// One `PLAYER_ID=STATUS` pair given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceMark {
    pub player_id: PlayerId,
    pub status: AttendanceStatus,
}

impl AttendanceMark {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let (id_raw, status_raw) = raw
            .split_once('=')
            .ok_or_else(|| AppError::InvalidMark(raw.to_string()))?;

        let player_id: PlayerId = id_raw
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidMark(raw.to_string()))?;

        let status = AttendanceStatus::from_input(status_raw)
            .ok_or_else(|| AppError::InvalidStatus(status_raw.trim().to_string()))?;

        Ok(Self { player_id, status })
    }
}
