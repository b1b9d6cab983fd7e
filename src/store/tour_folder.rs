// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::gateway::{
    CreateFromCustomResponse, DeleteTourResponse, GatewayError, SaveTourResponse,
    StartTourResponse, ToggleTourResponse, TourGateway, TourRecord, UpdateStepsResponse,
};
use crate::model::{
    course_id_from_path_match, decode_enabled, decode_steps, encode_step, CourseId,
    CustomTourPayload, ElementId, TourId, WireStep, WireTour, CUSTOM_PAYLOAD_VERSION,
};

const TOURS_META_FILENAME: &str = "cicerone-tours.meta.json";

/// How hard writes try to reach stable storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to
    /// stable storage where possible. Exact guarantees are
    /// platform/filesystem-dependent.
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "malformed json at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToursMeta {
    next_id: i64,
}

impl Default for ToursMeta {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

/// A playable tour record, the analogue of the host's native tour tables.
/// Steps are stored normalized (selector-prefixed targets, canonical
/// placement strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTour {
    id: i64,
    courseid: i64,
    name: String,
    description: String,
    pathmatch: String,
    enabled: bool,
    sortorder: i64,
    steps: Vec<WireStep>,
}

/// A sticky draft held back from the native tables until materialized.
/// `rawdata` is the versioned payload blob, kept opaque on purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCustomTour {
    id: i64,
    courseid: i64,
    placementid: Option<String>,
    rawdata: String,
}

/// Folder-backed persistence gateway.
///
/// One directory per course: a meta file carrying the id counter plus one
/// JSON file per record (`tour-<id>.json`, `custom-<id>.json`). All writes
/// are temp-file-then-rename.
#[derive(Debug, Clone)]
pub struct TourFolder {
    dir: PathBuf,
    durability: WriteDurability,
}

impl TourFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The placements of persisted custom tours for a course, used to
    /// surface their start buttons when the editor initializes.
    pub fn custom_placements(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<(TourId, ElementId)>, StoreError> {
        let mut placements = Vec::new();
        for record in self.list_custom_tours(course_id)? {
            let Some(placementid) = record.placementid else {
                continue;
            };
            let Ok(container) = ElementId::new(placementid) else {
                continue;
            };
            placements.push((TourId::new(record.id), container));
        }
        Ok(placements)
    }

    fn tour_path(&self, id: i64) -> PathBuf {
        self.dir.join(format!("tour-{id}.json"))
    }

    fn custom_path(&self, id: i64) -> PathBuf {
        self.dir.join(format!("custom-{id}.json"))
    }

    fn allocate_id(&self) -> Result<i64, StoreError> {
        let meta_path = self.dir.join(TOURS_META_FILENAME);
        let mut meta = match self.read_json::<ToursMeta>(&meta_path)? {
            Some(meta) => meta,
            None => ToursMeta::default(),
        };
        let id = meta.next_id;
        meta.next_id += 1;
        self.write_json(&meta_path, &meta)?;
        Ok(id)
    }

    fn read_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &Path,
    ) -> Result<Option<T>, StoreError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io { path: path.to_path_buf(), source });
            }
        };
        let value = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(value)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
        self.write_atomic(path, &contents)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp_path = self.dir.join(format!(".cicerone.tmp.{file_name}.{nanos}"));

        let io_err =
            |path: &Path, source: io::Error| StoreError::Io { path: path.to_path_buf(), source };

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|source| io_err(&tmp_path, source))?;
        file.write_all(contents).map_err(|source| io_err(&tmp_path, source))?;
        if self.durability == WriteDurability::Durable {
            file.sync_all().map_err(|source| io_err(&tmp_path, source))?;
        }
        drop(file);

        if let Err(source) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(path, source));
        }

        if self.durability == WriteDurability::Durable {
            // Rename durability needs the directory flushed too, where the
            // platform allows opening it.
            if let Ok(dir_file) = fs::File::open(&self.dir) {
                let _ = dir_file.sync_all();
            }
        }
        Ok(())
    }

    fn load_tour(&self, id: i64) -> Result<Option<StoredTour>, StoreError> {
        self.read_json(&self.tour_path(id))
    }

    fn list_records<T: for<'de> Deserialize<'de>>(
        &self,
        prefix: &str,
    ) -> Result<Vec<T>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: self.dir.clone(), source }),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = name.strip_prefix(prefix).and_then(|s| s.strip_suffix(".json"))
            else {
                continue;
            };
            if let Ok(id) = stem.parse::<i64>() {
                ids.push(id);
            }
        }
        ids.sort_unstable();

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let path = self.dir.join(format!("{prefix}{id}.json"));
            if let Some(record) = self.read_json::<T>(&path)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn list_custom_tours(&self, course_id: CourseId) -> Result<Vec<StoredCustomTour>, StoreError> {
        let mut records: Vec<StoredCustomTour> = self.list_records("custom-")?;
        records.retain(|record| record.courseid == course_id.get());
        Ok(records)
    }

    fn normalize_steps(steps: &[WireStep]) -> Result<Vec<WireStep>, String> {
        match decode_steps(steps) {
            Ok(decoded) => Ok(decoded.iter().map(encode_step).collect()),
            Err(err) => Err(format!("Invalid step data: {err}")),
        }
    }
}

fn transport(err: StoreError) -> GatewayError {
    GatewayError::Transport { message: err.to_string() }
}

fn record_from_stored(stored: &StoredTour) -> Result<TourRecord, GatewayError> {
    let steps = serde_json::to_string(&stored.steps)
        .map_err(|err| GatewayError::Transport { message: err.to_string() })?;
    Ok(TourRecord {
        id: stored.id,
        courseid: stored.courseid,
        name: stored.name.clone(),
        description: stored.description.clone(),
        steps,
        enabled: stored.enabled,
    })
}

impl TourGateway for TourFolder {
    fn save_tour(&self, tour: &WireTour) -> Result<SaveTourResponse, GatewayError> {
        let Some(course_id) = course_id_from_path_match(&tour.pathmatch) else {
            return Ok(SaveTourResponse {
                success: false,
                tourid: 0,
                message: "Invalid course id in path match".to_owned(),
            });
        };

        if tour.custom {
            let rawdata = serde_json::to_string(&CustomTourPayload::new(tour.clone()))
                .map_err(|err| GatewayError::Transport { message: err.to_string() })?;
            let id = self.allocate_id().map_err(transport)?;
            let record = StoredCustomTour {
                id,
                courseid: course_id.get(),
                placementid: tour.placementid.clone(),
                rawdata,
            };
            self.write_json(&self.custom_path(id), &record).map_err(transport)?;
            return Ok(SaveTourResponse {
                success: true,
                tourid: id,
                message: "Custom tour created successfully".to_owned(),
            });
        }

        let steps = match Self::normalize_steps(&tour.steps) {
            Ok(steps) => steps,
            Err(message) => {
                return Ok(SaveTourResponse { success: false, tourid: 0, message });
            }
        };

        let id = self.allocate_id().map_err(transport)?;
        let record = StoredTour {
            id,
            courseid: course_id.get(),
            name: tour.name.clone(),
            description: tour.description.clone(),
            pathmatch: tour.pathmatch.clone(),
            enabled: decode_enabled(&tour.enabled),
            sortorder: tour.sortorder.parse().unwrap_or(0),
            steps,
        };
        self.write_json(&self.tour_path(id), &record).map_err(transport)?;

        Ok(SaveTourResponse {
            success: true,
            tourid: id,
            message: "Tour created successfully".to_owned(),
        })
    }

    fn get_tour(&self, tour_id: TourId) -> Result<TourRecord, GatewayError> {
        let stored = self
            .load_tour(tour_id.get())
            .map_err(transport)?
            .ok_or(GatewayError::NotFound { tour_id })?;
        record_from_stored(&stored)
    }

    fn get_course_tours(
        &self,
        course_id: CourseId,
        enabled_only: bool,
    ) -> Result<Vec<TourRecord>, GatewayError> {
        let mut stored: Vec<StoredTour> = self.list_records("tour-").map_err(transport)?;
        stored.retain(|record| record.courseid == course_id.get());
        if enabled_only {
            stored.retain(|record| record.enabled);
        }
        stored.iter().map(record_from_stored).collect()
    }

    fn delete_tour(&self, tour_id: TourId) -> Result<DeleteTourResponse, GatewayError> {
        let path = self.tour_path(tour_id.get());
        match fs::remove_file(&path) {
            Ok(()) => Ok(DeleteTourResponse { success: true }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(GatewayError::NotFound { tour_id })
            }
            Err(source) => Err(transport(StoreError::Io { path, source })),
        }
    }

    fn update_steps(
        &self,
        tour_id: TourId,
        steps_json: &str,
    ) -> Result<UpdateStepsResponse, GatewayError> {
        let mut stored = self
            .load_tour(tour_id.get())
            .map_err(transport)?
            .ok_or(GatewayError::NotFound { tour_id })?;

        // The host transport sends "null" for an empty list.
        let wire_steps: Vec<WireStep> = if steps_json.trim() == "null" {
            Vec::new()
        } else {
            serde_json::from_str(steps_json).map_err(|err| GatewayError::Transport {
                message: format!("invalid steps JSON: {err}"),
            })?
        };

        stored.steps = match Self::normalize_steps(&wire_steps) {
            Ok(steps) => steps,
            Err(message) => return Err(GatewayError::Transport { message }),
        };
        self.write_json(&self.tour_path(stored.id), &stored).map_err(transport)?;
        Ok(UpdateStepsResponse { success: true })
    }

    fn start_tour(&self, tour_id: TourId) -> Result<StartTourResponse, GatewayError> {
        let record = self.get_tour(tour_id)?;
        Ok(StartTourResponse {
            id: record.id,
            name: record.name,
            description: record.description,
            steps: record.steps,
        })
    }

    fn toggle_tour_enabled(
        &self,
        tour_id: TourId,
        enabled: bool,
    ) -> Result<ToggleTourResponse, GatewayError> {
        let mut stored = self
            .load_tour(tour_id.get())
            .map_err(transport)?
            .ok_or(GatewayError::NotFound { tour_id })?;
        stored.enabled = enabled;
        self.write_json(&self.tour_path(stored.id), &stored).map_err(transport)?;
        Ok(ToggleTourResponse { success: true, enabled })
    }

    fn create_tour_from_custom(
        &self,
        course_id: CourseId,
    ) -> Result<CreateFromCustomResponse, GatewayError> {
        let reject = |message: &str| CreateFromCustomResponse {
            success: false,
            tourid: 0,
            message: message.to_owned(),
            reload: None,
        };

        let customs = self.list_custom_tours(course_id).map_err(transport)?;
        let Some(custom) = customs.first() else {
            return Ok(reject("No custom tour found for this course"));
        };

        let Ok(payload) = serde_json::from_str::<CustomTourPayload>(&custom.rawdata) else {
            return Ok(reject("Invalid tour data in custom tour"));
        };
        if payload.version != CUSTOM_PAYLOAD_VERSION {
            return Ok(reject(&format!(
                "Unsupported custom payload version {}",
                payload.version
            )));
        }
        if payload.tour.steps.is_empty() {
            return Ok(reject("Custom tour has no steps defined"));
        }

        let steps = match Self::normalize_steps(&payload.tour.steps) {
            Ok(steps) => steps,
            Err(message) => return Ok(reject(&message)),
        };

        let id = self.allocate_id().map_err(transport)?;
        let record = StoredTour {
            id,
            courseid: course_id.get(),
            name: payload.tour.name.clone(),
            description: payload.tour.description.clone(),
            pathmatch: payload.tour.pathmatch.clone(),
            enabled: decode_enabled(&payload.tour.enabled),
            sortorder: payload.tour.sortorder.parse().unwrap_or(0),
            steps,
        };
        let step_count = record.steps.len();
        self.write_json(&self.tour_path(id), &record).map_err(transport)?;

        Ok(CreateFromCustomResponse {
            success: true,
            tourid: id,
            message: format!("Tour created successfully with {step_count} steps"),
            reload: Some(true),
        })
    }
}

#[cfg(test)]
mod tests;
