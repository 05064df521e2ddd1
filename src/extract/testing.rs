//! In-memory native objects for unit tests.

use std::collections::HashSet;

use crate::model::ShapeId;
use crate::native::{
    Children, MediaCollection, NativeConnect, NativeFill, NativeMaster, NativePage, NativeShape,
    Probe, ProbeError, ShapeContainer, ShapeRef,
};

fn probe<T: Clone>(
    fail: &HashSet<&'static str>,
    member: &'static str,
    value: &Option<T>,
) -> Probe<T> {
    if fail.contains(member) {
        return Err(ProbeError::new(format!("{} unavailable", member)));
    }
    Ok(value.clone())
}

fn children<'a>(
    fail: &HashSet<&'static str>,
    member: &'static str,
    value: &'a Option<Vec<MockShape>>,
) -> Probe<Children<'a>> {
    if fail.contains(member) {
        return Err(ProbeError::new(format!("{} unavailable", member)));
    }
    Ok(value.as_ref().map(|shapes| {
        shapes
            .iter()
            .map(|s| Box::new(s.clone()) as ShapeRef<'a>)
            .collect()
    }))
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockShape {
    pub text: Option<String>,
    pub name: Option<String>,
    pub id: Option<ShapeId>,
    pub legacy_id: Option<ShapeId>,
    pub master: Option<MockMaster>,
    pub shapes: Option<Vec<MockShape>>,
    pub child_shapes: Option<Vec<MockShape>>,
    pub sub_shapes: Option<Vec<MockShape>>,
    pub connects: Option<Vec<MockConnect>>,
    pub one_d: Option<bool>,
    pub begin: Option<Box<MockShape>>,
    pub end: Option<Box<MockShape>>,
    pub image_data: Option<Vec<u8>>,
    pub image: Option<Vec<u8>>,
    pub file: Option<Vec<u8>>,
    pub fill_image: Option<Vec<u8>>,
    pub fail: HashSet<&'static str>,
}

impl MockShape {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Some(ShapeId::from(id)),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn failing(mut self, member: &'static str) -> Self {
        self.fail.insert(member);
        self
    }
}

impl ShapeContainer for MockShape {
    fn shapes(&self) -> Probe<Children<'_>> {
        children(&self.fail, "shapes", &self.shapes)
    }

    fn child_shapes(&self) -> Probe<Children<'_>> {
        children(&self.fail, "child_shapes", &self.child_shapes)
    }

    fn sub_shapes(&self) -> Probe<Children<'_>> {
        children(&self.fail, "sub_shapes", &self.sub_shapes)
    }
}

impl NativeShape for MockShape {
    fn text(&self) -> Probe<String> {
        probe(&self.fail, "text", &self.text)
    }

    fn name(&self) -> Probe<String> {
        probe(&self.fail, "name", &self.name)
    }

    fn id(&self) -> Probe<ShapeId> {
        probe(&self.fail, "ID", &self.id)
    }

    fn legacy_id(&self) -> Probe<ShapeId> {
        probe(&self.fail, "id", &self.legacy_id)
    }

    fn master(&self) -> Probe<Box<dyn NativeMaster + '_>> {
        Ok(probe(&self.fail, "master", &self.master)?
            .map(|m| Box::new(m) as Box<dyn NativeMaster>))
    }

    fn connects(&self) -> Probe<Vec<Box<dyn NativeConnect + '_>>> {
        Ok(probe(&self.fail, "connects", &self.connects)?.map(|list| {
            list.into_iter()
                .map(|c| Box::new(c) as Box<dyn NativeConnect>)
                .collect()
        }))
    }

    fn one_d(&self) -> Probe<bool> {
        probe(&self.fail, "one_d", &self.one_d)
    }

    fn begin_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(probe(&self.fail, "begin_shape", &self.begin)?.map(|s| s as ShapeRef<'_>))
    }

    fn end_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(probe(&self.fail, "end_shape", &self.end)?.map(|s| s as ShapeRef<'_>))
    }

    fn image_data(&self) -> Probe<Vec<u8>> {
        probe(&self.fail, "image_data", &self.image_data)
    }

    fn image(&self) -> Probe<Vec<u8>> {
        probe(&self.fail, "image", &self.image)
    }

    fn file(&self) -> Probe<Vec<u8>> {
        probe(&self.fail, "file", &self.file)
    }

    fn fill(&self) -> Probe<Box<dyn NativeFill + '_>> {
        Ok(probe(&self.fail, "fill", &self.fill_image)?
            .map(|image| Box::new(MockFill { image }) as Box<dyn NativeFill>))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockMaster {
    pub name: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

impl NativeMaster for MockMaster {
    fn name(&self) -> Probe<String> {
        Ok(self.name.clone())
    }

    fn image_data(&self) -> Probe<Vec<u8>> {
        Ok(self.image_data.clone())
    }
}

struct MockFill {
    image: Vec<u8>,
}

impl NativeFill for MockFill {
    fn image(&self) -> Probe<Vec<u8>> {
        Ok(Some(self.image.clone()))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockConnect {
    pub from: Option<MockShape>,
    pub to: Option<MockShape>,
}

impl MockConnect {
    pub fn between(from: &str, to: &str) -> Self {
        Self {
            from: Some(MockShape::with_id(from)),
            to: Some(MockShape::with_id(to)),
        }
    }
}

impl NativeConnect for MockConnect {
    fn from_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(self.from.clone().map(|s| Box::new(s) as ShapeRef<'_>))
    }

    fn to_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(self.to.clone().map(|s| Box::new(s) as ShapeRef<'_>))
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockPage {
    pub name: Option<String>,
    pub shapes: Option<Vec<MockShape>>,
    pub media: Option<MediaCollection>,
    pub images: Option<MediaCollection>,
    pub fail: HashSet<&'static str>,
}

impl ShapeContainer for MockPage {
    fn shapes(&self) -> Probe<Children<'_>> {
        children(&self.fail, "shapes", &self.shapes)
    }
}

impl NativePage for MockPage {
    fn name(&self) -> Probe<String> {
        probe(&self.fail, "name", &self.name)
    }

    fn media(&self) -> Probe<MediaCollection> {
        probe(&self.fail, "media", &self.media)
    }

    fn images(&self) -> Probe<MediaCollection> {
        probe(&self.fail, "images", &self.images)
    }
}
