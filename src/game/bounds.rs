/// Integer axis-aligned rectangle in playfield pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.width / 2;
        self.y = cy - self.height / 2;
    }

    pub fn set_midbottom(&mut self, cx: i32, bottom: i32) {
        self.x = cx - self.width / 2;
        self.y = bottom - self.height;
    }

    pub fn set_midtop(&mut self, cx: i32, top: i32) {
        self.x = cx - self.width / 2;
        self.y = top;
    }

    /// Overlap test; rectangles that only share an edge do not collide.
    pub fn collides(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}
