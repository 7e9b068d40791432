/// Vertex shader for every solid mesh
pub const MESH_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec2 v_uv;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    // Non-uniform scales (stems) need the inverse-transpose for normals
    v_normal = transpose(inverse(mat3(u_model))) * a_normal;
    v_uv = a_uv;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Ambient + point light + Blinn-Phong, optional texture, optional emissive
pub const MESH_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec2 v_uv;

uniform vec3 u_camera_pos;
uniform vec3 u_color;
uniform vec3 u_emissive;
uniform float u_shininess;
uniform bool u_lit;
uniform bool u_use_texture;
uniform sampler2D u_texture;

uniform float u_ambient_strength;
uniform vec3 u_light_pos;
uniform float u_light_intensity;

out vec4 fragColor;

void main() {
    vec3 base = u_color;
    if (u_use_texture) {
        base *= texture(u_texture, v_uv).rgb;
    }

    if (!u_lit) {
        fragColor = vec4(base + u_emissive, 1.0);
        return;
    }

    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);
    // Petals are two-sided; light whichever face we see
    if (dot(normal, view_dir) < 0.0) {
        normal = -normal;
    }

    vec3 light_dir = normalize(u_light_pos - v_world_position);
    float ndotl = max(dot(normal, light_dir), 0.0);

    vec3 half_dir = normalize(light_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), u_shininess) * 0.25;

    vec3 color = base * u_ambient_strength
        + base * ndotl * u_light_intensity
        + vec3(spec) * u_light_intensity
        + u_emissive;

    // Gamma correction
    color = pow(clamp(color, 0.0, 1.0), vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;

/// Vertex shader for water droplets
pub const PARTICLE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_size;
layout(location = 2) in float a_alpha;
layout(location = 3) in vec3 a_color;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_point_scale;

out float v_alpha;
out vec3 v_color;

void main() {
    v_alpha = a_alpha;
    v_color = a_color;

    vec4 view_pos = u_view * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    // World-space size with perspective attenuation
    gl_PointSize = max(a_size * u_point_scale / -view_pos.z, 1.0);
}
"#;

/// Fragment shader for water droplets
pub const PARTICLE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    if (length(coord) > 0.5) {
        discard;
    }
    fragColor = vec4(v_color, v_alpha);
}
"#;

/// Fullscreen triangle vertex shader for post-processing
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

out vec2 v_uv;

void main() {
    float x = float((gl_VertexID & 1) << 2);
    float y = float((gl_VertexID & 2) << 1);
    v_uv = vec2(x * 0.5, y * 0.5);
    gl_Position = vec4(x - 1.0, y - 1.0, 0.0, 1.0);
}
"#;

/// Bloom extraction with a soft knee
pub const BLOOM_EXTRACT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform float u_threshold;
uniform float u_smoothing;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_texture, v_uv).rgb;
    float luma = dot(color, vec3(0.2126, 0.7152, 0.0722));
    float weight = smoothstep(u_threshold, u_threshold + u_smoothing, luma);
    fragColor = vec4(color * weight, 1.0);
}
"#;

/// Separable Gaussian blur
pub const BLUR_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform vec2 u_direction;

out vec4 fragColor;

void main() {
    vec2 texel = 1.0 / vec2(textureSize(u_texture, 0));
    float weights[5] = float[](0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);

    vec3 result = texture(u_texture, v_uv).rgb * weights[0];
    for (int i = 1; i < 5; i++) {
        vec2 offset = u_direction * texel * float(i) * 2.0;
        result += texture(u_texture, v_uv + offset).rgb * weights[i];
        result += texture(u_texture, v_uv - offset).rgb * weights[i];
    }

    fragColor = vec4(result, 1.0);
}
"#;

/// Scene + bloom
pub const COMPOSITE_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_scene;
uniform sampler2D u_bloom;
uniform float u_bloom_strength;

out vec4 fragColor;

void main() {
    vec3 scene = texture(u_scene, v_uv).rgb;
    vec3 bloom = texture(u_bloom, v_uv).rgb;
    fragColor = vec4(scene + bloom * u_bloom_strength, 1.0);
}
"#;
