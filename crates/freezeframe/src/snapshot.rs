//! Attribute snapshot of a live camera.
//!
//! A [`CameraState`] is a flat value record: later edits to the source camera
//! never reach a snapshot that was already taken.

use freezeframe_core::{AttrValue, FreezeError, FreezeOptions, NodeId, NodeKind, Result, SceneGraph};
use glam::Vec3;

/// Transform channels captured from every camera.
pub const TRANSFORM_ATTRIBUTES: [&str; 3] = ["translate", "rotate", "scale"];

/// Optical attributes every camera must expose.
pub const REQUIRED_OPTICAL_ATTRIBUTES: [&str; 6] = [
    "focalLength",
    "horizontalFilmAperture",
    "verticalFilmAperture",
    "nearClipPlane",
    "farClipPlane",
    "cameraScale",
];

/// Transform and optical state of a camera at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub focal_length: f64,
    pub horizontal_aperture: f64,
    pub vertical_aperture: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    pub camera_scale: f64,
    /// Allowlisted optional attributes, in allowlist order.
    pub extra: Vec<(String, AttrValue)>,
}

impl CameraState {
    /// Reads the evaluated state of `camera`.
    ///
    /// Fails with [`FreezeError::Resolution`] when `camera` is not a camera or
    /// lacks one of the required attributes. Optional attributes listed in
    /// `options.camera_attributes` are captured when present.
    pub fn capture<G>(graph: &G, camera: NodeId, options: &FreezeOptions) -> Result<Self>
    where
        G: SceneGraph + ?Sized,
    {
        let name = graph
            .node_name(camera)
            .map_err(|err| FreezeError::resolution(camera.to_string(), err.to_string()))?;
        let kind = graph
            .node_kind(camera)
            .map_err(|err| FreezeError::resolution(&name, err.to_string()))?;
        if kind != NodeKind::Camera {
            return Err(FreezeError::resolution(
                &name,
                format!("node is a {kind}, not a camera"),
            ));
        }

        let reader = Reader {
            graph,
            node: camera,
            name: &name,
        };

        let mut extra = Vec::new();
        for attribute in &options.camera_attributes {
            let attribute = attribute.as_str();
            let is_core = TRANSFORM_ATTRIBUTES.contains(&attribute)
                || REQUIRED_OPTICAL_ATTRIBUTES.contains(&attribute);
            if is_core || extra.iter().any(|(a, _): &(String, AttrValue)| a == attribute) {
                continue;
            }
            if !graph.has_attribute(camera, attribute) {
                log::debug!("camera '{name}' has no '{attribute}', skipping");
                continue;
            }
            extra.push((attribute.to_string(), reader.value(attribute)?));
        }

        Ok(Self {
            translation: reader.vec3("translate")?,
            rotation: reader.vec3("rotate")?,
            scale: reader.vec3("scale")?,
            focal_length: reader.float("focalLength")?,
            horizontal_aperture: reader.float("horizontalFilmAperture")?,
            vertical_aperture: reader.float("verticalFilmAperture")?,
            near_clip: reader.float("nearClipPlane")?,
            far_clip: reader.float("farClipPlane")?,
            camera_scale: reader.float("cameraScale")?,
            extra,
        })
    }

    /// Returns every captured attribute as `(name, value)` pairs: transform
    /// channels, then required optics, then the allowlisted extras.
    pub fn attributes(&self) -> Vec<(&str, AttrValue)> {
        let mut attrs: Vec<(&str, AttrValue)> = vec![
            ("translate", self.translation.into()),
            ("rotate", self.rotation.into()),
            ("scale", self.scale.into()),
            ("focalLength", self.focal_length.into()),
            ("horizontalFilmAperture", self.horizontal_aperture.into()),
            ("verticalFilmAperture", self.vertical_aperture.into()),
            ("nearClipPlane", self.near_clip.into()),
            ("farClipPlane", self.far_clip.into()),
            ("cameraScale", self.camera_scale.into()),
        ];
        attrs.extend(self.extra.iter().map(|(name, value)| (name.as_str(), value.clone())));
        attrs
    }

    /// Returns an allowlisted optional attribute.
    pub fn extra(&self, name: &str) -> Option<&AttrValue> {
        self.extra.iter().find(|(a, _)| a == name).map(|(_, v)| v)
    }
}

struct Reader<'a, G: ?Sized> {
    graph: &'a G,
    node: NodeId,
    name: &'a str,
}

impl<G: SceneGraph + ?Sized> Reader<'_, G> {
    fn value(&self, attribute: &str) -> Result<AttrValue> {
        if !self.graph.has_attribute(self.node, attribute) {
            return Err(FreezeError::resolution(
                self.name,
                format!("missing attribute '{attribute}'"),
            ));
        }
        self.graph
            .get_attribute(self.node, attribute)
            .map_err(|err| FreezeError::resolution(self.name, err.to_string()))
    }

    fn float(&self, attribute: &str) -> Result<f64> {
        let value = self.value(attribute)?;
        value.as_float().ok_or_else(|| self.wrong_type(attribute, "float", &value))
    }

    fn vec3(&self, attribute: &str) -> Result<Vec3> {
        let value = self.value(attribute)?;
        value.as_vec3().ok_or_else(|| self.wrong_type(attribute, "vec3", &value))
    }

    fn wrong_type(&self, attribute: &str, expected: &str, value: &AttrValue) -> FreezeError {
        FreezeError::resolution(
            self.name,
            format!(
                "attribute '{attribute}' is {}, expected {expected}",
                value.type_name()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freezeframe_core::{ErrorKind, MemoryHost, Plug, Timeline};

    #[test]
    fn test_capture_defaults() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.set_attribute(cam, "translate", Vec3::new(1.0, 2.0, 3.0).into())
            .unwrap();
        host.set_attribute(cam, "focalLength", AttrValue::Float(50.0))
            .unwrap();

        let state = CameraState::capture(&host, cam, &FreezeOptions::default()).unwrap();
        assert_eq!(state.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.scale, Vec3::ONE);
        assert_eq!(state.focal_length, 50.0);
        assert_eq!(state.extra("fStop"), Some(&AttrValue::Float(5.6)));
        assert_eq!(state.extra("filmFit"), Some(&AttrValue::Int(1)));
        assert_eq!(state.attributes().len(), 9 + 5);
    }

    #[test]
    fn test_snapshot_is_a_value() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let state = CameraState::capture(&host, cam, &FreezeOptions::default()).unwrap();

        host.set_attribute(cam, "focalLength", AttrValue::Float(12.0))
            .unwrap();
        assert_eq!(state.focal_length, 35.0);
    }

    #[test]
    fn test_reads_evaluated_values() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let time = host.time_node();
        host.connect(
            &Plug::new(time, "outTime"),
            &Plug::new(cam, "focusDistance"),
        )
        .unwrap();
        host.set_current_frame(42.0);

        let state = CameraState::capture(&host, cam, &FreezeOptions::default()).unwrap();
        assert_eq!(state.extra("focusDistance"), Some(&AttrValue::Float(42.0)));
    }

    #[test]
    fn test_missing_optional_attribute_is_skipped() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.remove_attribute(cam, "fStop").unwrap();
        let options = FreezeOptions {
            camera_attributes: vec!["fStop".into(), "focusDistance".into(), "focalLength".into()],
            ..FreezeOptions::default()
        };

        let state = CameraState::capture(&host, cam, &options).unwrap();
        assert_eq!(state.extra.len(), 1);
        assert!(state.extra("fStop").is_none());
    }

    #[test]
    fn test_not_a_camera() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        let plane = host.image_plane(cam, "a.png").unwrap();

        let err = CameraState::capture(&host, plane, &FreezeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn test_missing_required_attribute() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.remove_attribute(cam, "nearClipPlane").unwrap();

        let err = CameraState::capture(&host, cam, &FreezeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(err.to_string().contains("nearClipPlane"));
    }

    #[test]
    fn test_wrong_attribute_type() {
        let mut host = MemoryHost::new();
        let cam = host.camera("camA");
        host.add_attribute(cam, "rotate", AttrValue::Float(0.0))
            .unwrap();

        let err = CameraState::capture(&host, cam, &FreezeOptions::default()).unwrap_err();
        assert!(err.to_string().contains("'rotate' is float, expected vec3"));
    }
}
