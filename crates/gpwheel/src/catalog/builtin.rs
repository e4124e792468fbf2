//! The tool table shipped with the wheel, in the host's own identifiers.

/// Brush-asset form of a tool. An empty `tool` means the entry activates the brush at
/// `path` instead of selecting a tool.
#[derive(Debug, Clone, Copy)]
pub struct AssetDef {
    pub tool: &'static str,
    pub name: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub library_type: &'static str,
    pub library: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub name: &'static str,
    pub tool: &'static str,
    pub icon: &'static str,
    pub default: bool,
    pub asset: Option<AssetDef>,
}

#[derive(Debug, Clone, Copy)]
pub struct ModeDef {
    pub key: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub tool_order: &'static [usize],
    pub tools: &'static [ToolDef],
}

const fn tool(
    name: &'static str,
    tool: &'static str,
    icon: &'static str,
    default: bool,
) -> ToolDef {
    ToolDef {
        name,
        tool,
        icon,
        default,
        asset: None,
    }
}

const fn as_tool(mut def: ToolDef, tool: &'static str) -> ToolDef {
    def.asset = Some(AssetDef {
        tool,
        name: None,
        icon: None,
        library_type: "",
        library: "",
        path: "",
    });
    def
}

const fn as_brush(
    mut def: ToolDef,
    name: Option<&'static str>,
    library_type: &'static str,
    path: &'static str,
) -> ToolDef {
    def.asset = Some(AssetDef {
        tool: "",
        name,
        icon: None,
        library_type,
        library: "",
        path,
    });
    def
}

const WEIGHT_TOOLS: &[ToolDef] = &[
    as_tool(tool("Paint", "builtin_brush.Weight", "weight_paint_draw", true), "builtin.brush"),
    as_tool(tool("Blur", "builtin_brush.Blur", "vertex_paint_blur", true), "builtin_brush.blur"),
    as_tool(
        tool("Average", "builtin_brush.Average", "vertex_paint_average", true),
        "builtin_brush.average",
    ),
    as_tool(
        tool("Smear", "builtin_brush.Smear", "vertex_paint_smear", true),
        "builtin_brush.smear",
    ),
    as_tool(
        tool("Gradient", "builtin_brush.Gradient", "weight_paint_gradient", false),
        "builtin_brush.gradient",
    ),
];

const DRAW_TOOLS: &[ToolDef] = &[
    ToolDef {
        asset: Some(AssetDef {
            tool: "builtin.brush",
            name: None,
            icon: None,
            library_type: "ESSENTIALS",
            library: "",
            path: "brushes/essentials_brushes-gp_draw.blend/Brush/Pencil",
        }),
        ..tool("Draw", "builtin_brush.Draw", "draw_draw", true)
    },
    as_tool(tool("Fill", "builtin_brush.Fill", "draw_fill", true), "builtin_brush.Fill"),
    as_tool(tool("Erase", "builtin_brush.Erase", "draw_erase", true), "builtin_brush.Erase"),
    as_brush(
        tool("Tint", "builtin_brush.Tint", "draw_tint", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_draw.blend/Brush/Tint",
    ),
    ToolDef {
        asset: Some(AssetDef {
            tool: "builtin.trim",
            name: Some("Trim"),
            icon: None,
            library_type: "",
            library: "",
            path: "",
        }),
        ..tool("Cutter", "builtin.cutter", "draw_cutter", true)
    },
    as_tool(
        tool("Eyedropper", "builtin.eyedropper", "draw_eyedropper", true),
        "builtin.eyedropper",
    ),
    as_tool(tool("Line", "builtin.line", "draw_line", true), "builtin.line"),
    as_tool(tool("Polyline", "builtin.polyline", "draw_polyline", true), "builtin.polyline"),
    as_tool(tool("Arc", "builtin.arc", "draw_arc", true), "builtin.arc"),
    as_tool(tool("Curve", "builtin.curve", "draw_curve", true), "builtin.curve"),
    as_tool(tool("Box", "builtin.box", "draw_box", true), "builtin.box"),
    as_tool(tool("Circle", "builtin.circle", "draw_circle", true), "builtin.circle"),
    as_tool(
        tool("Interpolate", "builtin.interpolate", "edit_interpolate", false),
        "builtin.interpolate",
    ),
];

const VERTEX_TOOLS: &[ToolDef] = &[
    as_tool(tool("Draw", "builtin_brush.Draw", "vertex_paint_draw", true), "builtin.brush"),
    as_tool(tool("Blur", "builtin_brush.Blur", "vertex_paint_blur", true), "builtin_brush.blur"),
    as_tool(
        tool("Average", "builtin_brush.Average", "vertex_paint_average", true),
        "builtin_brush.average",
    ),
    as_tool(
        tool("Smear", "builtin_brush.Smear", "vertex_paint_smear", true),
        "builtin_brush.smear",
    ),
    as_tool(
        tool("Replace", "builtin_brush.Replace", "vertex_paint_replace", true),
        "builtin_brush.replace",
    ),
];

const EDIT_TOOLS: &[ToolDef] = &[
    tool("Select Box", "builtin.select_box", "object_select", true),
    tool("Move", "builtin.move", "object_move", true),
    tool("Rotate", "builtin.rotate", "object_rotate", true),
    tool("Scale", "builtin.scale", "object_scale", true),
    tool("Transform", "builtin.transform", "object_transform", true),
    tool("Extrude", "builtin.extrude", "edit_extrude", false),
    tool("Radius", "builtin.radius", "edit_radius", true),
    tool("Bend", "builtin.bend", "edit_bend", false),
    tool("Shear", "builtin.shear", "edit_shear", false),
    ToolDef {
        asset: Some(AssetDef {
            tool: "builtin.texture_gradient",
            name: Some("Gradient"),
            icon: Some("weight_paint_gradient"),
            library_type: "",
            library: "",
            path: "",
        }),
        ..tool("Transform Fill", "builtin.transform_fill", "edit_transform_fill", false)
    },
    tool("Interpolate", "builtin.interpolate", "edit_interpolate", true),
    tool("Tweak", "builtin.select", "edit_tweak", false),
    tool("Select Circle", "builtin.select_circle", "edit_select_circle", false),
    tool("Select Lasso", "builtin.select_lasso", "edit_select_lasso", false),
    tool("Cursor", "builtin.cursor", "edit_cursor", false),
    tool("Scale Cage", "builtin.scale_cage", "edit_scale_cage", false),
    tool("To Sphere", "builtin.to_sphere", "edit_to_sphere", false),
];

const SCULPT_TOOLS: &[ToolDef] = &[
    as_brush(
        tool("Smooth", "builtin_brush.Smooth", "sculpt_smooth", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Smooth",
    ),
    as_brush(
        tool("Thickness", "builtin_brush.Thickness", "sculpt_thickness", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Thickness",
    ),
    as_brush(
        tool("Strength", "builtin_brush.Strength", "sculpt_strength", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Strength",
    ),
    as_brush(
        tool("Randomize", "builtin_brush.Randomize", "sculpt_randomize", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Randomize",
    ),
    as_brush(
        tool("Grab", "builtin_brush.Grab", "sculpt_grab", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Grab",
    ),
    as_brush(
        tool("Push", "builtin_brush.Push", "sculpt_push", true),
        Some("Pull"),
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Pull",
    ),
    as_brush(
        tool("Twist", "builtin_brush.Twist", "sculpt_twist", false),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Twist",
    ),
    as_brush(
        tool("Pinch", "builtin_brush.Pinch", "sculpt_pinch", false),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Pinch",
    ),
    as_brush(
        tool("Clone", "builtin_brush.Clone", "sculpt_clone", true),
        None,
        "ESSENTIALS",
        "brushes/essentials_brushes-gp_sculpt.blend/Brush/Clone",
    ),
];

const OBJECT_TOOLS: &[ToolDef] = &[
    tool("Select Box", "builtin.select_box", "object_select", true),
    tool("Move", "builtin.move", "object_move", true),
    tool("Rotate", "builtin.rotate", "object_rotate", true),
    tool("Scale", "builtin.scale", "object_scale", true),
    tool("Transform", "builtin.transform", "object_transform", true),
    tool("Add GP Blank", "add.gp.empty", "add_gp_empty", true),
    tool("Add GP Stroke", "add.gp.stroke", "add_gp_stroke", true),
    tool("Add Empty", "add.empty", "add_empty", true),
    tool("Add Single Bone", "add.bone", "add_bone", false),
];

pub const MODES: &[ModeDef] = &[
    ModeDef {
        key: "weight",
        name: "Weight Paint",
        short_name: "Weight",
        tool_order: &[0, 1, 2, 3, 4],
        tools: WEIGHT_TOOLS,
    },
    ModeDef {
        key: "draw",
        name: "Draw Mode",
        short_name: "Draw",
        tool_order: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        tools: DRAW_TOOLS,
    },
    ModeDef {
        key: "vertex",
        name: "Vertex Paint",
        short_name: "Vertex",
        tool_order: &[0, 1, 2, 3, 4],
        tools: VERTEX_TOOLS,
    },
    ModeDef {
        key: "edit",
        name: "Edit Mode",
        short_name: "Edit",
        tool_order: &[11, 0, 12, 13, 14, 1, 2, 3, 15, 4, 5, 6, 7, 8, 16, 9, 10],
        tools: EDIT_TOOLS,
    },
    ModeDef {
        key: "sculpt",
        name: "Sculpt Mode",
        short_name: "Sculpt",
        tool_order: &[0, 1, 2, 3, 4, 5, 6, 7, 8],
        tools: SCULPT_TOOLS,
    },
    ModeDef {
        key: "object",
        name: "Object Mode",
        short_name: "Object",
        tool_order: &[0, 1, 2, 3, 4, 5, 6, 7, 8],
        tools: OBJECT_TOOLS,
    },
];
