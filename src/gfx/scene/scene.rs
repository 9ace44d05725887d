use crate::gfx::Color;

use super::{
    light::Light,
    object::{ObjectId, SceneObject},
};

/// Flat scene graph in insertion order
#[derive(Debug, Default)]
pub struct Scene {
    pub background: Color,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object and returns its id. Re-inserting an id already in the
    /// scene replaces the old object in place.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id();
        match self.index_of(id) {
            Some(index) => self.objects[index] = object,
            None => self.objects.push(object),
        }
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Visible lights with their world positions.
    pub fn lights(&self) -> impl Iterator<Item = (&SceneObject, &Light)> {
        self.objects
            .iter()
            .filter(|object| object.visible)
            .filter_map(|object| object.as_light().map(|light| (object, light)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object, returning them in insertion order.
    pub fn drain(&mut self) -> Vec<SceneObject> {
        std::mem::take(&mut self.objects)
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::generate_box,
        resources::Material,
        scene::LightKind,
    };

    fn cube() -> SceneObject {
        SceneObject::mesh(generate_box(1.0, 1.0, 1.0), Material::standard(Color::WHITE))
    }

    #[test]
    fn test_add_get_remove() {
        let mut scene = Scene::new();
        let a = scene.add(cube());
        let b = scene.add(cube());
        assert_eq!(scene.len(), 2);
        assert!(scene.contains(a));

        let removed = scene.remove(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(!scene.contains(a));
        assert_eq!(scene.objects()[0].id(), b);
        assert!(scene.remove(a).is_none());
    }

    #[test]
    fn test_readding_same_object_does_not_duplicate() {
        let mut scene = Scene::new();
        let object = cube();
        scene.add(object.clone());
        scene.add(object);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_lights_skip_hidden() {
        let mut scene = Scene::new();
        scene.add(SceneObject::light(Light::new(LightKind::Ambient, Color::WHITE, 1.0)));
        let mut hidden = SceneObject::light(Light::new(LightKind::Directional, Color::WHITE, 1.0));
        hidden.visible = false;
        scene.add(hidden);
        scene.add(cube());

        assert_eq!(scene.lights().count(), 1);
    }
}
